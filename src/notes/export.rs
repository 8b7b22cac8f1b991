//! Plain-text rendering of note documents

use crate::notes::models::NoteRecord;

/// Format an offset in seconds as HH:MM:SS.
pub fn format_timestamp(secs: u32) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Render one record as a labeled text block.
pub fn render_note_block(note: &NoteRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}: {}\n",
        format_timestamp(note.timestamp),
        note.main_topic
    ));

    push_section(&mut out, "Subtopics", &note.subtopics);
    push_section(&mut out, "Key Points", &note.key_points);
    push_section(&mut out, "Examples/Applications", &note.examples);

    if !note.definitions.is_empty() {
        out.push_str("\nKey Terms:\n");
        for (term, definition) in &note.definitions {
            out.push_str(&format!("  - {}: {}\n", term, definition));
        }
    }

    push_section(&mut out, "Detailed Explanations", &note.detailed_explanations);
    push_section(&mut out, "Practice Questions", &note.quiz_questions);
    push_section(&mut out, "Additional Resources", &note.additional_resources);

    out
}

fn push_section(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}:\n", label));
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
}

/// Flatten a whole note document into one plain-text string, one block per
/// record, blocks separated by a rule.
pub fn flatten_notes(title: &str, notes: &[NoteRecord]) -> String {
    let blocks: Vec<String> = notes.iter().map(render_note_block).collect();
    format!("{}\n\n{}", title, blocks.join("\n---\n\n"))
}

/// Split a note document into pages: the title page carries the first
/// record, every further record gets a page of its own.
pub fn paginate_notes(title: &str, notes: &[NoteRecord]) -> Vec<String> {
    let mut pages = Vec::new();
    let mut records = notes.iter();

    let mut first_page = format!("{}\n\n", title);
    if let Some(first) = records.next() {
        first_page.push_str(&render_note_block(first));
    }
    pages.push(first_page);

    for note in records {
        pages.push(render_note_block(note));
    }

    pages
}
