//! Fetch → filter → build, shared by the commands that need a graph

use boardgraph_core::{filter_board, Board, Config, Graph, GraphBuilder};
use boardgraph_jira::JiraClient;
use tracing::{info, warn};

/// Fetch the configured board and apply the classification filter
pub async fn load_board(config: &Config, all_pages: bool, verbose: bool) -> anyhow::Result<Board> {
    config.validate()?;

    let client = JiraClient::from_config(config)?;
    let board_id = config.jira.board_id;

    // Progress goes to the log (stderr); stdout is reserved for command output
    if verbose {
        info!(board_id, host = %client.host(), "Fetching board");
    }

    let mut board = if all_pages {
        client.get_board_all(board_id).await?
    } else {
        client.get_board(board_id).await?
    };

    let fetched = board.len();
    let removed = filter_board(&mut board, config.jira.filter_text.as_deref());

    info!(
        board_id,
        fetched,
        removed,
        kept = board.len(),
        "Board loaded"
    );

    Ok(board)
}

/// Build the link graph for an already filtered board
///
/// A malformed key anywhere fails the whole build so no partial graph is
/// ever rendered.
pub fn build_graph(config: &Config, board: &Board) -> anyhow::Result<Graph> {
    let graph = GraphBuilder::new(config.jira.prefix.clone())
        .build(&board.issues)
        .map_err(|e| anyhow::anyhow!("Cannot build graph for board {}: {}", config.jira.board_id, e))?;

    if graph.is_empty() {
        warn!(
            board_id = config.jira.board_id,
            filter = ?config.jira.filter_text,
            "No issues left to graph"
        );
    }

    Ok(graph)
}
