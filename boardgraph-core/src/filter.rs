//! Board filtering by classification value

use tracing::debug;

use crate::issue::{Board, Issue};

/// Check whether an issue's classification is exactly `filter_text`
///
/// Issues without a classification never match.
pub fn matches_classification(issue: &Issue, filter_text: &str) -> bool {
    issue.classification.as_deref() == Some(filter_text)
}

/// Keep only issues whose classification equals `filter_text`
///
/// Filters in place. With no filter the board is left untouched. Returns
/// the number of issues removed.
pub fn filter_board(board: &mut Board, filter_text: Option<&str>) -> usize {
    let Some(filter_text) = filter_text else {
        return 0;
    };

    let before = board.issues.len();
    board
        .issues
        .retain(|issue| matches_classification(issue, filter_text));
    let removed = before - board.issues.len();

    debug!(
        filter = filter_text,
        kept = board.issues.len(),
        removed,
        "Filtered board by classification"
    );

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(key: &str, value: Option<&str>) -> Issue {
        let mut issue = Issue::new(key, "summary");
        issue.classification = value.map(str::to_string);
        issue
    }

    #[test]
    fn test_filter_keeps_exact_matches() {
        let mut board = Board::new(vec![
            classified("PROJ-1", Some("Team A")),
            classified("PROJ-2", Some("Team B")),
        ]);

        let removed = filter_board(&mut board, Some("Team A"));

        assert_eq!(removed, 1);
        assert_eq!(board.len(), 1);
        assert_eq!(board.issues[0].key, "PROJ-1");
    }

    #[test]
    fn test_filter_is_exact() {
        let mut board = Board::new(vec![
            classified("PROJ-1", Some("team a")),
            classified("PROJ-2", Some("Team A2")),
            classified("PROJ-3", Some(" Team A")),
        ]);

        filter_board(&mut board, Some("Team A"));

        assert!(board.is_empty());
    }

    #[test]
    fn test_filter_drops_unclassified() {
        let mut board = Board::new(vec![
            classified("PROJ-1", None),
            classified("PROJ-2", Some("Team A")),
        ]);

        filter_board(&mut board, Some("Team A"));

        assert_eq!(board.len(), 1);
        assert_eq!(board.issues[0].key, "PROJ-2");
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let mut board = Board::new(vec![
            classified("PROJ-1", None),
            classified("PROJ-2", Some("Team A")),
        ]);

        assert_eq!(filter_board(&mut board, None), 0);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut board = Board::new(vec![
            classified("PROJ-3", Some("x")),
            classified("PROJ-1", Some("y")),
            classified("PROJ-2", Some("x")),
        ]);

        filter_board(&mut board, Some("x"));

        let keys: Vec<_> = board.issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["PROJ-3", "PROJ-2"]);
    }
}
