//! Canned encouragement replies for the chatbot endpoint.

use rand::seq::IndexedRandom;

/// The fixed reply pool.
pub const REPLIES: &[&str] = &[
    "You're doing better than you think! Keep going 💪",
    "It's okay to have tough days. Your progress matters.",
    "Every small step is a big win. Proud of you!",
    "If you need help, reach out. You're not alone.",
];

/// Pick a reply at random. The incoming message is not inspected.
pub fn pick_reply() -> &'static str {
    REPLIES.choose(&mut rand::rng()).copied().unwrap_or(REPLIES[0])
}
