// Prompts for the section enhancement flow. Each section kind gets its
// own system prompt so the model rewrites in the register that section
// calls for.

use crate::resume::sections::SectionKind;

const BASE_SYSTEM: &str = "You are an expert resume writer. Rewrite the text you are given \
    to be clear, specific and professional. Preserve every fact: do NOT invent employers, \
    dates, numbers or achievements that are not in the input. \
    Respond with the rewritten text only, no preamble and no commentary.";

/// Returns the system prompt for enhancing one section kind.
pub fn system_for(section: SectionKind) -> String {
    let focus = match section {
        SectionKind::Summary => {
            "The text is a professional summary. Keep it to a few sentences that \
             lead with the candidate's strongest qualification."
        }
        SectionKind::Experience => {
            "The text describes work experience. Prefer strong action verbs and \
             keep any metrics exactly as given."
        }
        SectionKind::Education => {
            "The text describes education. Keep institution names, degrees and \
             fields of study exactly as given."
        }
        SectionKind::Skill => {
            "The text lists skills. Normalize capitalization and remove \
             duplicates; do not add skills."
        }
        SectionKind::Contact => {
            "The text is contact information. Only fix formatting; never alter \
             names, numbers or addresses."
        }
    };
    format!("{BASE_SYSTEM}\n\n{focus}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_gets_a_distinct_prompt() {
        let kinds = [
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skill,
            SectionKind::Contact,
        ];
        let prompts: Vec<_> = kinds.iter().map(|k| system_for(*k)).collect();
        for (i, a) in prompts.iter().enumerate() {
            assert!(a.contains("expert resume writer"));
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
