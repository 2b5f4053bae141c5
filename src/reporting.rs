use crate::errors::SpoonError;
use crate::export::ExportedFiles;
use crate::tree::{CheckState, FileTree, NodeId};
use std::collections::HashMap;
use std::path::Path;
use tiktoken_rs::get_bpe_from_model;
use tracing::{debug, info};

pub fn check_marker(state: CheckState) -> &'static str {
    match state {
        CheckState::Checked => "[x]",
        CheckState::Unchecked => "[ ]",
        CheckState::PartiallyChecked => "[-]",
    }
}

/// One line per node with its check marker, indented by depth.
pub fn render_tree(tree: &FileTree) -> Vec<String> {
    tree.traverse()
        .into_iter()
        .map(|id| {
            let node = tree.node(id);
            let icon = if node.is_dir() {
                "📁"
            } else {
                get_file_icon(Path::new(&node.name))
            };
            format!(
                "{}{} {} {}",
                "    ".repeat(tree.depth(id)),
                check_marker(node.state),
                icon,
                node.name
            )
        })
        .collect()
}

pub fn print_tree(tree: &FileTree, extension: &str) {
    if tree.is_empty() {
        info!("No {} files found", extension);
        return;
    }
    info!(
        "{} Select all {} files",
        check_marker(tree.aggregate_state()),
        extension
    );
    for line in render_tree(tree) {
        info!("{}", line);
    }
}

/// Token count of each exported file, keyed by its relative path.
pub fn count_tokens(
    exported: &ExportedFiles,
    model: &str,
) -> Result<HashMap<String, usize>, SpoonError> {
    let tokenizer =
        get_bpe_from_model(model).map_err(|e| SpoonError::TokenizerError(e.to_string()))?;
    Ok(exported
        .iter()
        .map(|(title, file)| {
            let block = format!("# {}\n{}", title, file.content);
            (file.path.clone(), tokenizer.encode_ordinary(&block).len())
        })
        .collect())
}

/// Prints the checked part of the tree with per-file and per-directory token totals.
pub fn print_stats(tree: &FileTree, token_counts: &HashMap<String, usize>) {
    debug!("Printing statistics for token counts");
    let total: usize = token_counts.values().sum();
    info!("Overall ({} tokens)", total);
    let roots = tree.roots().to_vec();
    print_subtree(tree, &roots, "", token_counts);
}

fn print_subtree(
    tree: &FileTree,
    ids: &[NodeId],
    prefix: &str,
    token_counts: &HashMap<String, usize>,
) {
    let visible: Vec<NodeId> = ids
        .iter()
        .copied()
        .filter(|&id| tree.state(id) != CheckState::Unchecked)
        .collect();

    for (i, &id) in visible.iter().enumerate() {
        let is_last = i == visible.len() - 1;
        let connector = if is_last { "┗━━" } else { "┣━━" };
        let node = tree.node(id);

        if node.is_dir() {
            let subtotal: usize = tree
                .descendants(id)
                .iter()
                .filter_map(|&d| token_counts.get(&tree.node(d).path))
                .sum();
            info!("{}{}📂 {} ({} tokens)", prefix, connector, node.name, subtotal);
            let new_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            print_subtree(tree, &node.children, &new_prefix, token_counts);
        } else if let Some(count) = token_counts.get(&node.path) {
            info!(
                "{}{} {} {} ({} tokens)",
                prefix,
                connector,
                get_file_icon(Path::new(&node.name)),
                node.name,
                count
            );
        }
    }
}

pub fn get_file_icon(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") | Some("pyw") | Some("pyi") => "🐍",
        Some("js") | Some("mjs") => "🟨",
        Some("ts") | Some("tsx") => "🔷",
        Some("jsx") => "⚛️",
        Some("html") | Some("htm") => "🌐",
        Some("css") | Some("scss") | Some("sass") => "🎨",
        Some("java") => "☕",
        Some("c") | Some("h") => "🇨",
        Some("cpp") | Some("hpp") | Some("cc") | Some("cxx") => "🇨➕",
        Some("cs") => "🔷",
        Some("go") => "🐹",
        Some("rb") => "💎",
        Some("php") => "🐘",
        Some("swift") => "🕊️",
        Some("kt") | Some("kts") => "🇰",
        Some("rs") => "🦀",
        Some("json") => "🔖",
        Some("yaml") | Some("yml") => "🗂️",
        Some("xml") => "📰",
        Some("csv") => "📊",
        Some("ini") | Some("conf") | Some("toml") => "⚙️",
        Some("md") | Some("markdown") => "📝",
        Some("sh") | Some("bash") | Some("zsh") | Some("fish") => "🐚",
        Some("bat") | Some("cmd") | Some("ps1") => "🖥️",
        Some("ipynb") => "📓",
        _ => "📄",
    }
}
