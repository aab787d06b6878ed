use crate::state::TraversalOutcome;
use serde::Serialize;

/// Counters collected over one traversal run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Fetches that completed, the start page included
    pub pages_fetched: u64,

    /// Fetches that failed or timed out (dead ends)
    pub fetch_failures: u64,

    /// Distinct pages discovered, the start page included
    pub pages_discovered: u64,

    /// Links recorded but not queued because they lie past the depth cap
    pub links_beyond_depth: u64,

    /// Dequeued entries dropped before fetch
    pub entries_dropped: u64,
}

/// The sole output of a traversal run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversalResult {
    pub success: bool,

    /// Page titles from start to target; empty when no path was found
    pub path: Vec<String>,

    /// Hops from start to target, or -1 when no path was found
    pub degrees: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub outcome: TraversalOutcome,

    pub stats: TraversalStats,
}

impl TraversalResult {
    pub fn found(path: Vec<String>, degrees: u32, stats: TraversalStats) -> Self {
        Self {
            success: true,
            path,
            degrees: i64::from(degrees),
            message: None,
            outcome: TraversalOutcome::Found,
            stats,
        }
    }

    pub fn not_found(outcome: TraversalOutcome, message: String, stats: TraversalStats) -> Self {
        Self {
            success: false,
            path: Vec::new(),
            degrees: -1,
            message: Some(message),
            outcome,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_serialization() {
        let result = TraversalResult::found(
            vec!["A".to_string(), "Kevin Bacon".to_string()],
            1,
            TraversalStats::default(),
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["degrees"], 1);
        assert_eq!(json["path"][1], "Kevin Bacon");
        assert_eq!(json["outcome"], "found");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_not_found_serialization() {
        let result = TraversalResult::not_found(
            TraversalOutcome::Exhausted,
            "no path".to_string(),
            TraversalStats::default(),
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["degrees"], -1);
        assert_eq!(json["path"].as_array().unwrap().len(), 0);
        assert_eq!(json["message"], "no path");
        assert_eq!(json["outcome"], "exhausted");
    }
}
