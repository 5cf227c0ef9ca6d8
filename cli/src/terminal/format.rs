use colored::*;
use topomap_core::builder::LayerState;
use topomap_core::mapping::LayerOutcome;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn state_to_colored(outcome: &LayerOutcome) -> ColoredString {
    match outcome.state {
        LayerState::Failed => "failed".color(colors::FAILED).bold(),
        LayerState::Complete if outcome.stats.records == 0 => "empty".color(colors::EMPTY),
        LayerState::Complete => "complete".color(colors::COMPLETE).bold(),
        LayerState::Empty | LayerState::Building => "incomplete".color(colors::EMPTY),
    }
}

pub fn outcome_details(outcome: &LayerOutcome) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![("State".to_owned(), state_to_colored(outcome))];

    if let Some(error) = &outcome.error {
        details.push(("Error".to_owned(), error.color(colors::FAILED)));
        return details;
    }

    let stats = &outcome.stats;
    details.push(("Records".to_owned(), stats.records.to_string().normal()));
    details.push(("Nodes".to_owned(), stats.nodes.to_string().color(colors::NODE)));
    details.push(("Links".to_owned(), stats.links.to_string().color(colors::LINK)));
    if stats.duplicate_links > 0 {
        details.push((
            "Duplicates".to_owned(),
            stats.duplicate_links.to_string().dimmed(),
        ));
    }
    details
}

/// Flattens multi-line node ids and labels for single-line terminal output.
pub fn one_line(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_ids_collapse_to_one_line() {
        assert_eq!(one_line("R1\n(65001)"), "R1 (65001)");
    }
}
