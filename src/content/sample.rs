//! Built-in sample chapters used when no other content is available.

use super::types::{Chapter, ContentOrigin, Question};

fn question(id: &str, statement: &str, answer: bool, correct: &str, wrong: &str) -> Question {
    Question {
        id: id.to_string(),
        statement: statement.to_string(),
        correct_answer: answer,
        feedback_correct: correct.to_string(),
        feedback_wrong: wrong.to_string(),
    }
}

/// The fixed sample set. Every chapter is tagged [`ContentOrigin::Fallback`].
pub fn sample_chapters() -> Vec<Chapter> {
    vec![
        Chapter {
            id: "sample-basics".to_string(),
            number: 1,
            title: "Ballot Basics".to_string(),
            subtitle: "How measures reach your ballot".to_string(),
            description: "Initiatives, referendums and who gets to put them in front of voters."
                .to_string(),
            questions: vec![
                question(
                    "sample-basics-1",
                    "In many U.S. states, citizens can put a measure on the ballot by gathering petition signatures.",
                    true,
                    "Yes! Citizen initiatives qualify by collecting enough valid signatures.",
                    "Actually, about half the states allow citizen initiatives by petition.",
                ),
                question(
                    "sample-basics-2",
                    "A legislative referral is a measure placed on the ballot by citizens rather than lawmakers.",
                    false,
                    "Correct: referrals come from the legislature, not a petition drive.",
                    "Not quite. Legislative referrals are sent to voters by the legislature.",
                ),
                question(
                    "sample-basics-3",
                    "Voting YES on a ballot measure means you support the proposed change.",
                    true,
                    "Right. YES approves the measure as written.",
                    "A YES vote approves the proposal; NO keeps the current law.",
                ),
            ],
            origin: ContentOrigin::Fallback,
        },
        Chapter {
            id: "sample-money".to_string(),
            number: 2,
            title: "Bonds & Taxes".to_string(),
            subtitle: "Following the money".to_string(),
            description: "Many measures borrow or raise money for public projects.".to_string(),
            questions: vec![
                question(
                    "sample-money-1",
                    "A bond measure lets a government borrow money that is repaid over time, usually with interest.",
                    true,
                    "Exactly. Bonds are repaid with interest, often over decades.",
                    "Bonds are loans: the public body repays them with interest.",
                ),
                question(
                    "sample-money-2",
                    "Every local tax measure in every state passes with a simple majority.",
                    false,
                    "Correct. Some places require a supermajority, such as two-thirds.",
                    "Not always. Some tax measures need a supermajority to pass.",
                ),
            ],
            origin: ContentOrigin::Fallback,
        },
        Chapter {
            id: "sample-voting".to_string(),
            number: 3,
            title: "Casting Your Vote".to_string(),
            subtitle: "From registration to results".to_string(),
            description: "The practical steps between deciding and being counted.".to_string(),
            questions: vec![
                question(
                    "sample-voting-1",
                    "Registration deadlines are the same in every U.S. state.",
                    false,
                    "Right. Deadlines vary, and some states allow same-day registration.",
                    "They differ by state; some even register voters on Election Day.",
                ),
                question(
                    "sample-voting-2",
                    "Official voter guides often include arguments for and against each measure.",
                    true,
                    "Yes. Many guides print pro and con arguments side by side.",
                    "Many official guides do publish arguments from both sides.",
                ),
                question(
                    "sample-voting-3",
                    "You may skip a measure on your ballot and still have the rest of your votes counted.",
                    true,
                    "Correct. Leaving a contest blank does not spoil the ballot.",
                    "Skipping one item is allowed; your other choices still count.",
                ),
            ],
            origin: ContentOrigin::Fallback,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::validate_chapters;
    use std::collections::HashSet;

    #[test]
    fn test_sample_set_is_valid() {
        let chapters = sample_chapters();
        assert!(validate_chapters(&chapters).is_ok());
        assert!(chapters
            .iter()
            .all(|c| c.origin == ContentOrigin::Fallback));
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let chapters = sample_chapters();
        let mut seen = HashSet::new();
        for q in chapters.iter().flat_map(|c| c.questions.iter()) {
            assert!(seen.insert(q.id.clone()), "duplicate id {}", q.id);
        }
    }

    #[test]
    fn test_sample_chapters_numbered_in_order() {
        let numbers: Vec<u32> = sample_chapters().iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
