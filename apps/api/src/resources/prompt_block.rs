//! Renders fetched resources into the reference block the composer inserts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceResource {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// `None` when no resource has usable content.
pub fn format_resources_for_prompt(resources: &[ReferenceResource]) -> Option<String> {
    let entries: Vec<String> = resources
        .iter()
        .filter(|r| !r.content.trim().is_empty())
        .enumerate()
        .map(|(i, r)| {
            format!(
                "REFERENCE RESOURCE {}:\nTitle: {}\nURL: {}\nContent: {}\n---",
                i + 1,
                r.title,
                r.url,
                r.content.trim()
            )
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    Some(format!(
        "IMPORTANT: You have access to the following reference resources. \
         Use these as primary sources of information when relevant to the topic:\n\n\
         {}\n\n\
         When referencing these resources, incorporate the information naturally into your post. \
         DO NOT just copy-paste or over-quote. Instead, distill the key insights and present them \
         in your persona's voice.",
        entries.join("\n\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(title: &str, content: &str) -> ReferenceResource {
        ReferenceResource {
            title: title.to_string(),
            url: format!("https://bowl.com/{}", title.to_lowercase()),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(format_resources_for_prompt(&[]), None);
        assert_eq!(format_resources_for_prompt(&[resource("Rules", "  ")]), None);
    }

    #[test]
    fn test_numbering_skips_empty_entries() {
        let block = format_resources_for_prompt(&[
            resource("Empty", ""),
            resource("Rules", "Foul line rules."),
            resource("Etiquette", "Yield to the bowler on your right."),
        ])
        .unwrap();

        assert!(block.starts_with("IMPORTANT: You have access"));
        assert!(block.contains("REFERENCE RESOURCE 1:\nTitle: Rules\nURL: https://bowl.com/rules\nContent: Foul line rules.\n---"));
        assert!(block.contains("REFERENCE RESOURCE 2:\nTitle: Etiquette"));
        assert!(!block.contains("REFERENCE RESOURCE 3"));
        assert!(!block.contains("Title: Empty"));
    }
}
