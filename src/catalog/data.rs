//! Static catalog tables: trick names, props and time estimates.
//!
//! Content here is authoring data. Items and time estimates are assigned to
//! tricks positionally by a running counter over the generation order, not by
//! trick identity; that quirk is kept as-is.

use crate::model::TrickCategory;

/// Trick names per category, one row of five per difficulty level.
pub(super) fn names(category: TrickCategory) -> &'static [[&'static str; 5]; 3] {
    match category {
        TrickCategory::CardTricks => &CARD_TRICK_NAMES,
        TrickCategory::CoinTricks => &COIN_TRICK_NAMES,
        TrickCategory::MindReading => &MIND_READING_NAMES,
        TrickCategory::CloseUpMagic => &CLOSE_UP_MAGIC_NAMES,
        TrickCategory::Illusions => &ILLUSION_NAMES,
    }
}

/// Items-needed lookup per category.
pub(super) fn items(category: TrickCategory) -> &'static [&'static [&'static str]] {
    match category {
        TrickCategory::CardTricks => &CARD_ITEMS,
        TrickCategory::CoinTricks => &COIN_ITEMS,
        TrickCategory::MindReading => &MIND_READING_ITEMS,
        TrickCategory::CloseUpMagic => &CLOSE_UP_MAGIC_ITEMS,
        TrickCategory::Illusions => &ILLUSION_ITEMS,
    }
}

const CARD_TRICK_NAMES: [[&str; 5]; 3] = [
    [
        "The Four Aces",
        "Simple Card Prediction",
        "Card to Pocket",
        "The Rising Card",
        "Color Change",
    ],
    [
        "Ambitious Card",
        "Card Through Window",
        "Invisible Deck",
        "Triumph",
        "Out of This World",
    ],
    [
        "ACAAN",
        "Card Warp",
        "Hofzinser Ace Problem",
        "The Berglas Effect",
        "Memorized Deck Routine",
    ],
];

const COIN_TRICK_NAMES: [[&str; 5]; 3] = [
    [
        "Coin Vanish",
        "Coin Through Table",
        "French Drop",
        "Coin Behind Ear",
        "Coin Roll",
    ],
    [
        "Coin Matrix",
        "Spellbound",
        "Coins Across",
        "Coin in Bottle",
        "Hanging Coin",
    ],
    [
        "Coin Assembly",
        "Copper Silver Brass",
        "Coin Cascade",
        "Coin Through Glass",
        "Misers Dream",
    ],
];

const MIND_READING_NAMES: [[&str; 5]; 3] = [
    [
        "Number Prediction",
        "Color Divination",
        "Book Test Basic",
        "Name Reveal",
        "Drawing Duplication",
    ],
    [
        "Center Tear",
        "Psychological Force",
        "Dual Reality",
        "Propless Prediction",
        "Instant Stooge",
    ],
    [
        "Acidus Novus",
        "Pegasus Page",
        "Thought Transmission",
        "Multiple Out System",
        "Anagram Revelation",
    ],
];

const CLOSE_UP_MAGIC_NAMES: [[&str; 5]; 3] = [
    [
        "Rubber Band Magic",
        "Sponge Balls",
        "Cups and Balls Basic",
        "Ring on String",
        "Linking Paperclips",
    ],
    [
        "Linking Rings",
        "Rope Through Neck",
        "Bill in Lemon",
        "Torn and Restored",
        "Multiplying Sponges",
    ],
    [
        "Chop Cup Routine",
        "Ring Flight",
        "Cigarette Through Coin",
        "Needle Through Arm",
        "Salt Pour",
    ],
];

const ILLUSION_NAMES: [[&str; 5]; 3] = [
    [
        "Floating Card",
        "Levitating Ring",
        "Balancing Act",
        "Gravity Defying Bottle",
        "Floating Bill",
    ],
    [
        "Zombie Ball",
        "Floating Table",
        "Sword Suspension",
        "Levitation Basic",
        "Penetration Frame",
    ],
    [
        "Full Body Levitation",
        "Sawing in Half",
        "Metamorphosis",
        "Sub Trunk",
        "Origami Illusion",
    ],
];

const CARD_ITEMS: [&[&str]; 15] = [
    &["Deck of cards"],
    &["Deck of cards", "Table"],
    &["Deck of cards", "Pocket"],
    &["Deck of cards", "Thread"],
    &["Deck of cards", "Double-sided card"],
    &["Deck of cards", "Duplicate card"],
    &["Deck of cards", "Window"],
    &["Special deck", "Regular deck"],
    &["Deck of cards", "Table"],
    &["Two decks of cards"],
    &["Deck of cards", "Spectator"],
    &["Special gimmick", "Deck of cards"],
    &["Memorized deck", "Table"],
    &["Deck of cards", "Preparation"],
    &["Memorized deck", "Performance space"],
];

const COIN_ITEMS: [&[&str]; 15] = [
    &["Coin", "Hand"],
    &["Coin", "Table"],
    &["Coin"],
    &["Coin"],
    &["Coin", "Fingers"],
    &["Four coins", "Mat"],
    &["Two coins", "Different metals"],
    &["Three coins", "Spectator"],
    &["Coin", "Bottle"],
    &["Coin", "String"],
    &["Four coins", "Close-up mat"],
    &["Three coins", "Different metals"],
    &["Multiple coins"],
    &["Coin", "Glass"],
    &["Coins", "Bag"],
];

const MIND_READING_ITEMS: [&[&str]; 15] = [
    &["Paper", "Pen"],
    &["Color swatches"],
    &["Book", "Paper"],
    &["Paper", "Pen"],
    &["Paper", "Pen", "Drawing pad"],
    &["Paper", "Envelope"],
    &["Nothing required"],
    &["Nothing required"],
    &["Paper", "Pen"],
    &["Spectator"],
    &["Special gimmick", "Preparation"],
    &["Book", "Special preparation"],
    &["Nothing required"],
    &["Multiple predictions", "Envelopes"],
    &["Paper", "Pen", "Dictionary"],
];

const CLOSE_UP_MAGIC_ITEMS: [&[&str]; 15] = [
    &["Rubber band"],
    &["Sponge balls"],
    &["Cups", "Balls"],
    &["Ring", "String"],
    &["Paperclips"],
    &["Linking rings"],
    &["Rope"],
    &["Bill", "Lemon", "Preparation"],
    &["Paper", "Napkin"],
    &["Sponge balls"],
    &["Chop cup", "Ball"],
    &["Ring", "Special gimmick"],
    &["Cigarette", "Coin", "Gimmick"],
    &["Needle", "Thread"],
    &["Salt shaker", "Gimmick"],
];

const ILLUSION_ITEMS: [&[&str]; 15] = [
    &["Playing card", "Thread"],
    &["Ring", "Thread"],
    &["Object to balance"],
    &["Bottle", "Special preparation"],
    &["Bill", "Thread"],
    &["Ball", "Gimmick"],
    &["Table", "Special construction"],
    &["Sword", "Box"],
    &["Assistant", "Platform"],
    &["Frame", "Object"],
    &["Assistant", "Platform", "Preparation"],
    &["Box", "Assistant", "Saw"],
    &["Assistant", "Cabinet", "Trunk"],
    &["Two trunks", "Assistant"],
    &["Paper", "Special construction"],
];

/// Estimated practice times in minutes, cycled positionally.
pub(super) const ESTIMATED_TIMES: [u32; 15] = [5, 8, 10, 7, 6, 12, 15, 18, 14, 16, 20, 25, 22, 28, 30];

/// Bespoke step sequence for the "Card to Pocket" trick.
pub(super) const CARD_TO_POCKET_STEPS: [&str; 9] = [
    "Choose a target card (e.g., the top card of the deck).",
    "Casually place the target card at the top of the deck before you begin.",
    "Overhand Force: Hold the deck and perform an overhand shuffle, but retain the top card by \
     injogging it with your thumb as you shuffle. Complete the shuffle, keeping the injogged card \
     on top.",
    "Ask the spectator to say \"stop\" at any time as you flip through the cards. Stop at the \
     injogged card, and reveal it as their selection.",
    "As the spectator looks at the card, casually take the card back, seemingly placing it in the \
     middle of the deck, but secretly keep it palmed in your hand.",
    "Once the card is in your palm, discreetly put your hand in your pocket and leave the card \
     there.",
    "Make a magical gesture (snap your fingers, wave your hand over the deck, etc.).",
    "Announce that their selected card has magically traveled to your pocket.",
    "Reach into your pocket and dramatically produce the card.",
];
