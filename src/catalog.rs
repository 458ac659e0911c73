//! Trick catalog generation.
//!
//! The catalog is generated fresh from static tables whenever no stored
//! catalog exists. Generation is pure and deterministic: same tables, same
//! 75 tricks, same ids.

mod data;

use crate::model::{Difficulty, Trick, TrickCategory, TrickStep};

/// Name of the one trick with a bespoke step sequence.
const CARD_TO_POCKET: &str = "Card to Pocket";

/// Generate the full trick catalog.
///
/// One trick per (category, difficulty, name) triple, ids assigned
/// sequentially in generation order. Items-needed and estimated time cycle
/// through their lookup tables by a global running counter.
pub fn generate_all() -> Vec<Trick> {
    let mut tricks = Vec::with_capacity(75);
    let mut trick_id = 1u32;
    let mut item_index = 0usize;

    for category in TrickCategory::ALL {
        let names = data::names(category);
        let items = data::items(category);

        for (level, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            for title in names[level] {
                let items_needed = items[item_index % items.len()]
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                let estimated_time =
                    data::ESTIMATED_TIMES[item_index % data::ESTIMATED_TIMES.len()];

                tricks.push(Trick {
                    id: format!("trick-{}", trick_id),
                    title: title.to_string(),
                    category,
                    difficulty,
                    description: format!(
                        "Learn the amazing {} trick. This {} level {} trick will amaze your \
                         audience!",
                        title,
                        difficulty.as_str().to_lowercase(),
                        category.as_str().to_lowercase()
                    ),
                    summary: format!(
                        "Master the {} trick and amaze your audience with this {} level effect.",
                        title,
                        difficulty.as_str().to_lowercase()
                    ),
                    method: format!(
                        "This trick uses fundamental {} level techniques. Practice each move \
                         slowly and carefully before performing.",
                        difficulty.as_str().to_lowercase()
                    ),
                    items_needed,
                    estimated_time,
                    steps: generate_steps(difficulty, title),
                    is_favorite: false,
                    progress: 0.0,
                    completed_at: None,
                    last_viewed_at: None,
                });

                trick_id += 1;
                item_index += 1;
            }
        }
    }

    tricks
}

/// Generate the step sequence for one trick.
fn generate_steps(difficulty: Difficulty, title: &str) -> Vec<TrickStep> {
    if title == CARD_TO_POCKET {
        return data::CARD_TO_POCKET_STEPS
            .iter()
            .enumerate()
            .map(|(i, instruction)| TrickStep {
                id: format!("step-{}", i + 1),
                step_number: i as u32 + 1,
                instruction: instruction.to_string(),
                completed: false,
            })
            .collect();
    }

    (1..=difficulty.step_count())
        .map(|n| TrickStep {
            id: format!("step-{}", n),
            step_number: n as u32,
            instruction: format!(
                "Step {}: {} - {} level instruction. Practice this movement carefully and ensure \
                 smooth execution. Focus on your timing and misdirection to create the perfect \
                 illusion.",
                n,
                title,
                difficulty.as_str()
            ),
            completed: false,
        })
        .collect()
}
