use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagram::Diagram;

/// Info strings that mark a fenced code block as a mind map. `obmind` is the
/// tag used by notes written for the Obsidian plugin.
pub const BLOCK_TAGS: &[&str] = &["mindmap", "obmind"];

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export: the diagram is empty")]
    Empty,
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Contents of every fenced code block tagged `mindmap` or `obmind`, in
/// document order.
pub fn extract_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info
                    .split_whitespace()
                    .next()
                    .is_some_and(|tag| BLOCK_TAGS.contains(&tag)) =>
            {
                current = Some(String::new());
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Outline sources found in a file: its mind map blocks, or the whole file
/// when it has none.
pub fn load_sources(path: &Path) -> Result<Vec<String>, IoError> {
    let content = read_file(path)?;
    let blocks = extract_blocks(&content);
    log::debug!("{} mindmap block(s) in {}", blocks.len(), path.display());
    if blocks.is_empty() {
        Ok(vec![content])
    } else {
        Ok(blocks)
    }
}

/// Write the current view of `diagram` as an SVG document
pub fn export_svg(diagram: &Diagram, path: &Path) -> Result<(), ExportError> {
    let svg = diagram.to_svg().ok_or(ExportError::Empty)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, svg).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("exported diagram to {}", path.display());
    Ok(())
}
