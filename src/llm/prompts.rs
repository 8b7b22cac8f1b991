use crate::notes::{TimestampAnchor, VideoMetadata};

/// Title used when the extractor handed us an empty one.
const FALLBACK_TITLE: &str = "Untitled video";

/// Build a deterministic note-generation prompt for a video lecture.
///
/// The prompt tells the model exactly how many records to produce and at
/// which timestamps, and spells out the JSON object shape; that contract is
/// what lets the parser enforce count and order afterwards.
pub fn build_notes_prompt(metadata: &VideoMetadata, anchors: &[TimestampAnchor]) -> String {
    let title = match metadata.title.trim() {
        "" => FALLBACK_TITLE,
        trimmed => trimmed,
    };

    let description = metadata
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("Not available");

    let duration = metadata
        .duration_secs
        .map(|d| format!("{} seconds", d))
        .unwrap_or_else(|| "unknown seconds".to_string());

    let offsets = anchors
        .iter()
        .map(|a| format!("{} seconds", a.offset_secs))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "As an expert academic note generator, produce comprehensive and well-structured study \
notes for a video lecture with the following information:\n\
\n\
Title: \"{title}\"\n\
Description: \"{description}\"\n\
Duration: {duration}\n\
\n\
For each of the {count} timestamps at ({offsets}), generate detailed and in-depth academic \
notes that include the following elements:\n\
\n\
Main Topic: The central theme or subject being discussed during this segment of the lecture.\n\
Subtopics: Identify 2-3 closely related subtopics or secondary concepts that elaborate on the \
main topic or expand on the discussion.\n\
Key Points: Extract and summarize 3-5 critical ideas, insights, or arguments presented by the \
lecturer, ensuring that they cover essential details that contribute to a deeper understanding \
of the subject.\n\
Examples and Applications: Provide relevant real-world examples or practical applications that \
illustrate how the concepts discussed can be applied in academic, professional, or everyday \
contexts.\n\
Key Terms and Definitions: Highlight important terminology or specialized vocabulary used in \
the lecture. For each key term, provide a clear and concise definition.\n\
Detailed Explanations: Include any elaborations, clarifications, or extensions of concepts \
presented by the lecturer, such as analogies, comparisons, or deeper dives into the material.\n\
Potential Quiz Questions: Create 5-6 thought-provoking questions for each timestamp that test \
the learner's understanding of the material, ranging from basic factual recall to more \
analytical or conceptual questions.\n\
Additional Resources or References (Optional): If relevant, suggest academic papers, \
textbooks, or online resources that may provide further insights into the topics discussed at \
this timestamp.\n\
\n\
Format your response as a single JSON array of objects, with each object structured as \
follows:\n\
\n\
{{\n\
  \"timestamp\": number,\n\
  \"mainTopic\": string,\n\
  \"subtopics\": string[],\n\
  \"keyPoints\": string[],\n\
  \"examples\": string[],\n\
  \"definitions\": {{\n\
    \"term1\": \"definition1\",\n\
    \"term2\": \"definition2\"\n\
  }},\n\
  \"detailedExplanations\": string[],\n\
  \"quizQuestions\": string[],\n\
  \"additionalResources\": string[] (optional)\n\
}}\n\
\n\
Return only the JSON array, with no surrounding prose. Ensure that the notes are highly \
detailed, academic, and suitable for deep learning and study purposes. Assume that the video \
is an educational lecture at the college or university level.",
        title = title,
        description = description,
        duration = duration,
        count = anchors.len(),
        offsets = offsets,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::plan_anchors;

    fn metadata(duration: Option<f64>) -> VideoMetadata {
        VideoMetadata {
            title: "Intro to X".to_string(),
            description: None,
            duration_secs: duration,
            transcript: None,
            url: "https://example.com/watch?v=abc".to_string(),
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let meta = metadata(Some(540.0));
        let anchors = plan_anchors(meta.duration_secs);
        assert_eq!(
            build_notes_prompt(&meta, &anchors),
            build_notes_prompt(&meta, &anchors)
        );
    }

    #[test]
    fn default_duration_anchors_appear_verbatim() {
        let meta = metadata(None);
        let prompt = build_notes_prompt(&meta, &plan_anchors(None));

        assert!(prompt.contains("Title: \"Intro to X\""));
        assert!(prompt.contains("Duration: unknown seconds"));
        assert!(prompt.contains("4 timestamps at (75 seconds, 225 seconds, 375 seconds, 525 seconds)"));
    }

    #[test]
    fn missing_description_reads_not_available() {
        let prompt = build_notes_prompt(&metadata(Some(600.0)), &plan_anchors(Some(600.0)));
        assert!(prompt.contains("Description: \"Not available\""));
        assert!(prompt.contains("Duration: 600 seconds"));
    }

    #[test]
    fn empty_title_falls_back() {
        let mut meta = metadata(None);
        meta.title = "  ".to_string();
        let prompt = build_notes_prompt(&meta, &plan_anchors(None));
        assert!(prompt.contains(&format!("Title: \"{}\"", FALLBACK_TITLE)));
    }

    #[test]
    fn schema_fields_are_spelled_out() {
        let prompt = build_notes_prompt(&metadata(None), &plan_anchors(None));
        for field in [
            "\"timestamp\"",
            "\"mainTopic\"",
            "\"subtopics\"",
            "\"keyPoints\"",
            "\"examples\"",
            "\"definitions\"",
            "\"detailedExplanations\"",
            "\"quizQuestions\"",
            "\"additionalResources\"",
        ] {
            assert!(prompt.contains(field), "prompt is missing {}", field);
        }
    }
}
