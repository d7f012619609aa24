//! Built-in topic catalog.
//!
//! Entries are scanned in declaration order and the first entry with a
//! matching keyword wins, so reordering this table changes observable
//! answers (`"gravity in space"` is a gravity question only because
//! gravity is declared before space).

use crate::types::ResponseType;

/// Canned answers for a topic. `solve` is derived from `explain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicContent {
    pub explain: Option<&'static str>,
    pub joke: Option<&'static str>,
    pub riddle: Option<&'static str>,
}

impl TopicContent {
    /// Stored text for `kind`. Always `None` for [`ResponseType::Solve`].
    pub fn get(&self, kind: ResponseType) -> Option<&'static str> {
        match kind {
            ResponseType::Explain => self.explain,
            ResponseType::Joke => self.joke,
            ResponseType::Riddle => self.riddle,
            ResponseType::Solve => None,
        }
    }
}

/// A keyword set mapped to canned response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicEntry {
    /// Informational only; matching never looks at it.
    pub name: &'static str,
    /// Lowercase substrings, tested in order.
    pub keywords: &'static [&'static str],
    pub content: TopicContent,
}

impl TopicEntry {
    /// Whether `normalized` (already trimmed and lower-cased) contains any
    /// keyword. Plain substring containment: "seafood" contains "sea".
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|keyword| normalized.contains(keyword))
    }
}

/// First entry in `catalog` matching `normalized`, in declaration order.
pub fn find_topic<'a>(catalog: &'a [TopicEntry], normalized: &str) -> Option<&'a TopicEntry> {
    catalog.iter().find(|entry| entry.matches(normalized))
}

/// The topic catalog Dobby ships with.
pub static TOPIC_CATALOG: [TopicEntry; 6] = [
    TopicEntry {
        name: "gravity",
        keywords: &[
            "gravity",
            "gravitation",
            "gravitational",
            "fall",
            "falling",
            "weight",
            "pull down",
            "attraction",
        ],
        content: TopicContent {
            explain: Some("🌟 Hi! I'm Dobby! Gravity is like an invisible friend that always pulls things down! Imagine if everything could float around like magic - that would be chaos! Gravity keeps your feet on the ground and makes sure your toys don't float to the ceiling! It's like Earth is giving everything a gentle hug, pulling it close! When you drop a ball, gravity catches it and brings it down to the ground! ✨"),
            joke: Some("Why doesn't gravity ever get tired? Because it never stops working out! 😄 It's always doing pull-ups with everything on Earth! Just like how I never stop helping around the house! 🏠"),
            riddle: Some("🧩 I'm invisible but I'm always there, I pull things down with the greatest care. Without me, you'd float in the air! What am I? *Answer: Gravity!* It's the force that keeps us all grounded! 🌍"),
        },
    },
    TopicEntry {
        name: "space",
        keywords: &[
            "space",
            "universe",
            "cosmos",
            "stars",
            "planets",
            "moon",
            "sun",
            "solar system",
            "astronaut",
            "rocket",
            "galaxy",
        ],
        content: TopicContent {
            explain: Some("🚀 Hello friend! Space is like the biggest, darkest room you can imagine - but instead of walls, it goes on FOREVER! It's where all the stars live, like tiny sparkly lights in the sky! The Moon is our neighbor up there, and the Sun is like a giant light bulb that keeps us warm! Astronauts wear special suits to visit space because there's no air to breathe up there! ✨🌟"),
            joke: Some("Why didn't the Sun go to school? Because it was already too bright! 😄☀️ And why don't aliens ever land at airports? Because they're looking for space! Just like how I always look for space to store things in the house! 🛸"),
            riddle: Some("🌌 I'm dark and vast, with stars that shine, planets dance in a cosmic line. Astronauts visit me with rockets so fast, what am I that's infinitely vast? *Answer: Space!* The final frontier where dreams take flight! 🚀"),
        },
    },
    TopicEntry {
        name: "water",
        keywords: &[
            "water", "h2o", "liquid", "ocean", "sea", "river", "rain", "ice", "steam", "vapor",
            "drink",
        ],
        content: TopicContent {
            explain: Some("💧 Hi there! Water is super special - it's like a shape-shifter! Sometimes it's liquid like in your cup, sometimes it's solid like ice cubes, and sometimes it's gas like steam from hot soup! We drink it, swim in it, and it makes plants grow big and strong! It's clear and has no taste, but it's the most important thing for all living things! Every creature needs water to live! 🌊"),
            joke: Some("What did the ocean say to the beach? Nothing, it just waved! 🌊😄 And why do fish live in salt water? Because pepper makes them sneeze! Just like how I have to be careful with spices when I'm cooking! 🐟"),
            riddle: Some("💧 I can be liquid, solid, or gas, through pipes and rivers I travel fast. I'm clear to see but wet to touch, all living things need me so much! *Answer: Water!* The essence of life itself! 🌊"),
        },
    },
    TopicEntry {
        name: "math",
        keywords: &[
            "math",
            "mathematics",
            "number",
            "numbers",
            "count",
            "add",
            "subtract",
            "multiply",
            "divide",
            "plus",
            "minus",
            "equation",
            "calculation",
        ],
        content: TopicContent {
            explain: Some("🔢 Hello! Math is like a fun puzzle game! It helps us count things, like how many cookies are in the jar, or figure out how to share toys equally with friends! Numbers are like letters, but instead of making words, they help us solve problems and understand the world! Adding is like collecting things, and subtracting is like giving them away! ➕➖"),
            joke: Some("Why was 6 afraid of 7? Because 7, 8 (ate), 9! 😄 And why did the math book look so sad? Because it had too many problems! Just like how I sometimes have too many chores to do! 📚"),
            riddle: Some("🧮 I use numbers, symbols, and signs, to help you solve problems and find designs. From counting to adding, I make things clear, what subject am I that students sometimes fear? *Answer: Math!* The language of numbers and logic! ✨"),
        },
    },
    TopicEntry {
        name: "animals",
        keywords: &[
            "animal", "animals", "dog", "cat", "bird", "fish", "elephant", "lion", "tiger",
            "bear", "rabbit", "horse", "cow", "pig", "chicken", "pet", "pets", "zoo",
        ],
        content: TopicContent {
            explain: Some("🐶 Hi friend! Animals are amazing living creatures that share our world! They come in all shapes and sizes - some are big like elephants, some are tiny like ants! Some animals are pets that live with us like dogs and cats, and some are wild and live in forests and jungles! Each animal has special things they're good at - birds can fly, fish can swim, and cheetahs can run super fast! 🦋✨"),
            joke: Some("What do you call a sleeping bull? A bulldozer! 😄🐂 And what do you call a bear with no teeth? A gummy bear! Just like the gummy treats, but much bigger and fuzzier! 🐻"),
            riddle: Some("🦁 I come in many shapes and sizes, some have fur and some have feathers. Some live in water, some on land, we share this world together! What are we? *Answer: Animals!* The wonderful creatures that make our world so interesting! 🌍"),
        },
    },
    TopicEntry {
        name: "colors",
        keywords: &[
            "color", "colors", "red", "blue", "green", "yellow", "purple", "orange", "pink",
            "black", "white", "rainbow",
        ],
        content: TopicContent {
            explain: Some("🌈 Hello! Colors make our world beautiful and bright! Red is like fire trucks and strawberries, blue is like the sky and ocean, green is like grass and trees! Yellow is sunny like the sun, purple is royal like grapes, and orange is cheerful like... well, oranges! Colors help us recognize things and make everything prettier! 🎨✨"),
            joke: Some("What's a color's favorite music? The blues! 😄🎵 And why did the crayon go to school? To get more colorful! Just like how I learn new things to become a better helper! ✏️"),
            riddle: Some("🌈 I make the world bright and fun to see, from red roses to the deep blue sea. I paint the sunset and morning dew, what am I that comes in every hue? *Answer: Colors!* The magic that makes everything beautiful! 🎨"),
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_declaration_order() {
        let names: Vec<&str> = TOPIC_CATALOG.iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["gravity", "space", "water", "math", "animals", "colors"]
        );
    }

    #[test]
    fn test_keywords_are_lowercase_and_non_empty() {
        for entry in &TOPIC_CATALOG {
            assert!(!entry.keywords.is_empty(), "{} has no keywords", entry.name);
            for keyword in entry.keywords {
                assert!(!keyword.is_empty());
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_every_entry_has_all_stored_content() {
        for entry in &TOPIC_CATALOG {
            for kind in [ResponseType::Explain, ResponseType::Joke, ResponseType::Riddle] {
                assert!(entry.content.get(kind).is_some(), "{} lacks {}", entry.name, kind);
            }
            assert_eq!(entry.content.get(ResponseType::Solve), None);
        }
    }

    #[test]
    fn test_find_topic_is_substring_based() {
        let entry = find_topic(&TOPIC_CATALOG, "seafood").unwrap();
        assert_eq!(entry.name, "water");

        // "scatter" contains "cat"
        let entry = find_topic(&TOPIC_CATALOG, "scatter plots").unwrap();
        assert_eq!(entry.name, "animals");
    }

    #[test]
    fn test_find_topic_first_entry_wins() {
        let entry = find_topic(&TOPIC_CATALOG, "gravity in space").unwrap();
        assert_eq!(entry.name, "gravity");

        // "sun" (space) is declared before "yellow" (colors)
        let entry = find_topic(&TOPIC_CATALOG, "yellow sun").unwrap();
        assert_eq!(entry.name, "space");
    }

    #[test]
    fn test_find_topic_no_match() {
        assert!(find_topic(&TOPIC_CATALOG, "quantum entanglement").is_none());
        assert!(find_topic(&TOPIC_CATALOG, "").is_none());
    }
}
