use serde::Serialize;

/// Lines starting with this mark the upload date of re-published videos
const ORIGINALLY_PUBLISHED_PREFIX: &str = "Originally Published";

/// A video description split into its lead paragraph, an optional
/// "Originally Published" line and everything else
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDescription {
    pub first_paragraph: String,
    pub original_publish_timestamp: String,
    pub remaining_text: String,
}

/// Split a description into three zones.
///
/// Every line is trimmed and re-emitted with a trailing `\n`. The first
/// paragraph runs up to and including the first blank line. After it, the
/// last line starting with "Originally Published" becomes the timestamp and
/// all other lines are kept in order as the remaining text.
pub fn split_description(description: &str) -> SplitDescription {
    let mut split = SplitDescription::default();
    let mut in_first_paragraph = true;

    for line in description_lines(description) {
        if in_first_paragraph {
            split.first_paragraph.push_str(line);
            split.first_paragraph.push('\n');
            if line.is_empty() {
                in_first_paragraph = false;
            }
        } else if line.starts_with(ORIGINALLY_PUBLISHED_PREFIX) {
            split.original_publish_timestamp = line.to_string();
        } else {
            split.remaining_text.push_str(line);
            split.remaining_text.push('\n');
        }
    }

    split
}

fn description_lines(description: &str) -> impl Iterator<Item = &str> {
    // An empty description still counts as one (blank) line
    std::iter::once("")
        .filter(move |_| description.is_empty())
        .chain(description.lines().map(str::trim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_intro_timestamp_and_rest() {
        let split =
            split_description("Intro line\n\nOriginally Published: 2021-01-01\nExtra note\n");
        assert_eq!(split.first_paragraph, "Intro line\n\n");
        assert_eq!(
            split.original_publish_timestamp,
            "Originally Published: 2021-01-01"
        );
        assert_eq!(split.remaining_text, "Extra note\n");
    }

    #[test]
    fn empty_description() {
        let split = split_description("");
        assert_eq!(split.first_paragraph, "\n");
        assert_eq!(split.original_publish_timestamp, "");
        assert_eq!(split.remaining_text, "");
    }

    #[test]
    fn no_blank_line_keeps_everything_in_first_paragraph() {
        let split = split_description("one\ntwo\nOriginally Published: 2020");
        assert_eq!(
            split.first_paragraph,
            "one\ntwo\nOriginally Published: 2020\n"
        );
        assert_eq!(split.original_publish_timestamp, "");
        assert_eq!(split.remaining_text, "");
    }

    #[test]
    fn last_timestamp_wins() {
        let split = split_description(
            "Lead\n\nOriginally Published: 2019\nmiddle\nOriginally Published: 2020\nend",
        );
        assert_eq!(split.original_publish_timestamp, "Originally Published: 2020");
        assert_eq!(split.remaining_text, "middle\nend\n");
    }

    #[test]
    fn lines_are_trimmed_and_crlf_accepted() {
        let split = split_description("  Lead  \r\n   \r\n  Originally Published: x \r\n  tail\t");
        assert_eq!(split.first_paragraph, "Lead\n\n");
        assert_eq!(split.original_publish_timestamp, "Originally Published: x");
        assert_eq!(split.remaining_text, "tail\n");
    }

    #[test]
    fn blank_lines_after_first_paragraph_are_kept() {
        let split = split_description("a\n\nb\n\nc");
        assert_eq!(split.first_paragraph, "a\n\n");
        assert_eq!(split.remaining_text, "b\n\nc\n");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(split_description("x")).unwrap();
        assert_eq!(json["firstParagraph"], "x\n");
        assert_eq!(json["originalPublishTimestamp"], "");
        assert_eq!(json["remainingText"], "");
    }
}
