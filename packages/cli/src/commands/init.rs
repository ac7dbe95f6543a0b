use anyhow::Result;
use clap::Args;
use colored::Colorize;
use composer_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::PathBuf;

pub const EXAMPLE_SCRIPT_NAME: &str = "example.replay.json";

const EXAMPLE_SCRIPT: &str = r#"[
  { "AddComponent": { "title": "Card" } },
  { "AddChild": { "title": "Image", "childType": "Image" } },
  { "UpdateHtmlAttr": { "attr": "Src", "value": "cover.png" } },
  { "AddChild": { "title": "Paragraph", "childType": "Paragraph" } },
  { "AddComponent": { "title": "Gallery" } },
  { "AddChild": { "title": "Card", "childType": "COMP" } },
  { "HandleTransform": { "componentId": 2, "childId": 1, "width": 400, "height": 275 } }
]
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing composer project...".bright_blue().bold());

    let config_json = EditorConfig::default().to_json_pretty()?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Create example script
    let example_file = PathBuf::from(cwd).join(EXAMPLE_SCRIPT_NAME);
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_SCRIPT)?;
        println!("  {} Created {}", "✓".green(), EXAMPLE_SCRIPT_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", EXAMPLE_SCRIPT_NAME);
    println!("  2. Run: composer replay {} --tree --layout", EXAMPLE_SCRIPT_NAME);

    Ok(())
}
