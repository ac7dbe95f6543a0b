//! Replay scripts: a JSON array of mutations applied in order.
//!
//! ```json
//! [
//!   { "AddComponent": { "title": "Box" } },
//!   { "AddChild": { "title": "Image", "childType": "Image" } }
//! ]
//! ```

use crate::errors::EditorResult;
use crate::mutations::Mutation;
use composer_common::CommonError;
use std::path::Path;

pub fn parse_script(content: &str) -> EditorResult<Vec<Mutation>> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_script(path: &Path) -> EditorResult<Vec<Mutation>> {
    let content = std::fs::read_to_string(path).map_err(CommonError::from)?;
    parse_script(&content)
}
