use anyhow::Result;
use serde_json::{Value, json};
use vidscout::ui::{SearchOutcome, SearchSelection};

/// Print a plain-text representation of the search outcome.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
    if !outcome.accepted {
        println!("Search cancelled (query: '{}')", outcome.query);
        return;
    }

    match &outcome.selection {
        Some(SearchSelection::Title(title)) => {
            println!("{} [{}]", title.title, title.video_id);
        }
        Some(SearchSelection::Description(description)) => {
            println!("{} [{}]", description.title, description.video_id);
        }
        Some(SearchSelection::Segment(segment)) => {
            println!(
                "{}@{:.1}s: {}",
                segment.video_id, segment.start_time, segment.text
            );
        }
        None => println!("No selection"),
    }
    println!("{}", outcome.link);
}

fn selection_json(selection: Option<&SearchSelection>) -> Value {
    match selection {
        Some(SearchSelection::Title(title)) => json!({
            "type": "title",
            "video_id": title.video_id,
            "title": title.title,
            "channel_name": title.channel_name,
        }),
        Some(SearchSelection::Description(description)) => json!({
            "type": "description",
            "video_id": description.video_id,
            "title": description.title,
            "description": description.description,
        }),
        Some(SearchSelection::Segment(segment)) => json!({
            "type": "transcript",
            "id": segment.id.to_string(),
            "video_id": segment.video_id,
            "text": segment.text,
            "start_time": segment.start_time,
            "end_time": segment.end_time,
        }),
        None => Value::Null,
    }
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
    let payload = json!({
        "accepted": outcome.accepted,
        "query": outcome.query,
        "link": outcome.link,
        "selection": selection_json(outcome.selection.as_ref()),
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use vidscout::search::{ResultId, Segment};

    use super::*;

    #[test]
    fn json_format_includes_segment_selection() {
        let outcome = SearchOutcome {
            accepted: true,
            query: "machine learning".into(),
            link: "http://localhost:3000/search?q=machine+learning".into(),
            selection: Some(SearchSelection::Segment(Segment {
                id: ResultId::Number(7),
                video_id: "abc".into(),
                video_title: None,
                channel_name: None,
                text: "gradient descent".into(),
                start_time: 12.5,
                end_time: 15.0,
                language: Some("en".into()),
                is_available: true,
            })),
        };

        let json = format_outcome_json(&outcome).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["selection"]["type"], "transcript");
        assert_eq!(value["selection"]["id"], "7");
        assert_eq!(value["link"], "http://localhost:3000/search?q=machine+learning");
    }

    #[test]
    fn cancelled_outcome_has_null_selection() {
        let outcome = SearchOutcome {
            accepted: false,
            query: "rust".into(),
            link: String::new(),
            selection: None,
        };
        let value: Value =
            serde_json::from_str(&format_outcome_json(&outcome).expect("json")).expect("parse");
        assert_eq!(value["selection"], Value::Null);
        assert_eq!(value["accepted"], false);
    }
}
