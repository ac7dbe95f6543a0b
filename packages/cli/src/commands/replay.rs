use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use composer_editor::{
    load_script, ComponentTree, EditSession, EditorConfig, Mutation, Notice, Notifier,
};
use composer_layout::{resolve_layout, NodeKind, RenderNode};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON file containing an array of mutations
    pub script: String,

    /// Print the component tree of the focused component
    #[arg(long)]
    pub tree: bool,

    /// Print the resolved layout of the focused component
    #[arg(long)]
    pub layout: bool,

    /// Print tree and layout as JSON
    #[arg(long)]
    pub json: bool,
}

/// Shows user-facing notices inline with the step output
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    shown: usize,
}

impl ConsoleNotifier {
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: Notice) {
        self.shown += 1;
        println!("      {} {}", "⚠️".yellow(), notice.message.yellow());
    }
}

/// Outcome counts of one replay
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
}

pub async fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = EditorConfig::load(Path::new(cwd))?;
    let script_path = resolve_path(cwd, &args.script);
    if !script_path.exists() {
        return Err(anyhow!("Script does not exist: {}", script_path.display()));
    }

    let script = load_script(&script_path)?;
    debug!(script = %script_path.display(), steps = script.len(), "Loaded replay script");
    println!(
        "{} {} ({} mutations)",
        "▶️".bright_blue(),
        "Replaying".bright_blue().bold(),
        script.len()
    );

    let mut session = EditSession::with_notifier(config, ConsoleNotifier::default());
    let summary = run_script(&mut session, script).await;

    println!();
    if summary.rejected == 0 {
        println!(
            "{} Applied {} mutations successfully",
            "✅".green(),
            summary.applied
        );
    } else {
        println!(
            "{} Applied {} mutations, {} rejected",
            "⚠️".yellow(),
            summary.applied,
            summary.rejected
        );
        let notices = session.notifier().shown();
        if notices > 0 {
            println!("   {} of them need your attention", notices);
        }
    }

    let state = session.state();
    let focused = match state.focus_component_id() {
        Some(id) => id,
        None => {
            if args.tree || args.layout {
                println!("{}", "No component is focused".dimmed());
            }
            return Ok(());
        }
    };

    if args.tree {
        let tree = ComponentTree::build(state, focused)
            .ok_or_else(|| anyhow!("Focused component {} not found", focused))?;
        println!();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        } else {
            print!("{}", tree);
        }
    }

    if args.layout {
        let layout = resolve_layout(state)?;
        println!();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&layout)?);
        } else {
            for node in &layout.nodes {
                print_node(node, 0);
            }
        }
    }

    Ok(())
}

/// Apply every mutation in order, printing one line per step.
///
/// Component creation goes through the deferred factory path.
pub async fn run_script<N: Notifier>(
    session: &mut EditSession<N>,
    script: Vec<Mutation>,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for (index, mutation) in script.into_iter().enumerate() {
        let name = mutation.name();
        let result = match mutation {
            Mutation::AddComponent { title } => session.add_component(&title).await.map(|_| ()),
            mutation => match session.try_dispatch(mutation) {
                Ok(_) => Ok(()),
                Err(err) => {
                    session.report(name, &err);
                    Err(err)
                }
            },
        };

        match result {
            Ok(()) => {
                summary.applied += 1;
                println!("  {} [{}] {}", "✓".green(), index + 1, name);
            }
            Err(err) => {
                summary.rejected += 1;
                eprintln!(
                    "  {} [{}] {} - {}",
                    "✗".red(),
                    index + 1,
                    name,
                    err.to_string().red()
                );
            }
        }
    }

    summary
}

fn resolve_path(cwd: &str, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        PathBuf::from(cwd).join(path)
    }
}

fn print_node(node: &RenderNode, depth: usize) {
    let kind = match &node.kind {
        NodeKind::SelfPlacement => "self".to_string(),
        NodeKind::Component { component_id } => format!("component {}", component_id),
        NodeKind::Html { element } => element.to_lowercase(),
    };
    let rect = node.absolute;
    let geometry = format!("{}x{} at {},{}", rect.width, rect.height, rect.x, rect.y);
    println!(
        "{}{} {} {}",
        "  ".repeat(depth + 1),
        node.name.bold(),
        format!("({})", kind).dimmed(),
        geometry.cyan()
    );

    for child in &node.children {
        print_node(child, depth + 1);
    }
}
