//! Built-in words used when the content provider cannot be reached

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::source::WordCandidate;

type Entry = (&'static str, &'static str);

const GENERAL: &[Entry] = &[
    ("OFFICE", "Dunder Mifflin documentary"),
    ("ROSS", "Paleontologist with a monkey"),
    ("SEINFELD", "A show about nothing"),
    ("FRIENDS", "Pivot! Pivot! Pivot!"),
    ("LOST", "Plane crash on a mysterious island"),
    ("ADELE", "Singer who says Hello"),
    ("TITANIC", "Near, far, wherever you are movie"),
    ("DUNE", "Spice planet blockbuster"),
    ("BEYONCE", "Queen Bey of music"),
    ("MATRIX", "Red pill or blue pill?"),
    ("OFFER", "Refusal is not an option"),
    ("NETFLIX", "Streaming giant"),
];

struct Category {
    id: &'static str,
    name: &'static str,
    words: &'static [Entry],
}

const CATEGORIES: &[Category] = &[
    Category {
        id: "tv",
        name: "TV Bingers",
        words: &[
            ("FRIENDS", "Pivot! Pivot! Pivot!"),
            ("OFFICE", "Dunder Mifflin sitcom"),
            ("LOST", "Plane crash on mysterious island"),
            ("SOPRANOS", "New Jersey mob boss"),
            ("THRONES", "Winter is coming"),
            ("BREAKING", "Chemistry teacher turns dealer"),
            ("STRANGER", "Hawkins upside down"),
            ("CROWN", "Royal family drama"),
            ("MANDALORIAN", "Baby Yoda guardian"),
            ("TED", "Lasso the soccer coach"),
        ],
    },
    Category {
        id: "movies",
        name: "Blockbusters",
        words: &[
            ("TITANIC", "Near, far, wherever you are"),
            ("AVATAR", "Blue aliens on Pandora"),
            ("MATRIX", "Red pill or blue pill?"),
            ("GLADIATOR", "Are you not entertained?"),
            ("INCEPTION", "Dream within a dream"),
            ("JURASSIC", "Dinosaur park gone wrong"),
            ("BARBIE", "She has everything, he is just Ken"),
            ("OPPENHEIMER", "Destroyer of worlds biopic"),
            ("DUNE", "Spice must flow"),
            ("AVENGERS", "Marvel superhero team"),
        ],
    },
    Category {
        id: "music",
        name: "Hit Makers",
        words: &[
            ("BEYONCE", "Queen Bey"),
            ("ADELE", "Singer who says Hello"),
            ("SWIFT", "Eras Tour superstar"),
            ("DRAKE", "Canadian rapper"),
            ("EMINEM", "The real Slim Shady"),
            ("BEATLES", "Fab Four from Liverpool"),
            ("NIRVANA", "Smells Like Teen Spirit"),
            ("QUEEN", "Bohemian Rhapsody band"),
            ("GAGA", "Little Monsters mother"),
            ("ELVIS", "King of Rock and Roll"),
        ],
    },
    Category {
        id: "90s",
        name: "90s Nostalgia",
        words: &[
            ("TAMAGOTCHI", "Digital pocket pet"),
            ("FURBY", "Talking robotic toy"),
            ("SPICE", "Girls causing Girl Power"),
            ("FRIENDS", "Ross, Rachel, Monica"),
            ("MATRIX", "1999 sci-fi hit"),
            ("POKEMON", "Gotta catch em all"),
            ("DIALUP", "Noisy internet connection"),
            ("WALKMAN", "Portable cassette player"),
            ("POGS", "Cardboard disk game"),
            ("BEANIE", "Ty Babies collectible"),
        ],
    },
    Category {
        id: "gaming",
        name: "Gaming Legends",
        words: &[
            ("MARIO", "Plumber in red cap"),
            ("ZELDA", "Princess of Hyrule"),
            ("SONIC", "Fast blue hedgehog"),
            ("MINECRAFT", "Block building phenomenon"),
            ("FORTNITE", "Battle royale with building"),
            ("TETRIS", "Falling blocks puzzle"),
            ("HALO", "Master Chief shooter"),
            ("DOOM", "Demon slaying FPS"),
            ("SKYRIM", "Dragonborn RPG"),
            ("PORTAL", "Cake is a lie"),
        ],
    },
    Category {
        id: "anime",
        name: "Anime World",
        words: &[
            ("NARUTO", "Ninja aiming to be Hokage"),
            ("GOKU", "Saiyan seeking dragon balls"),
            ("LUFFY", "Rubber pirate captain"),
            ("PIKACHU", "Electric yellow mouse"),
            ("TOTORO", "Studio Ghibli forest spirit"),
            ("AKIRA", "Cyberpunk motorcycle movie"),
            ("TITAN", "Colossal wall breaker"),
            ("SAILOR", "Moon prism power"),
            ("NOTE", "Book that kills"),
            ("GHIBLI", "Famous animation studio"),
        ],
    },
    Category {
        id: "sports",
        name: "Sports Icons",
        words: &[
            ("JORDAN", "MJ of the Bulls"),
            ("MESSI", "Argentine soccer GOAT"),
            ("SERENA", "Tennis queen Williams"),
            ("TIGER", "Golf legend Woods"),
            ("BRADY", "QB with 7 rings"),
            ("LEBRON", "King James of NBA"),
            ("BOLT", "Fastest man alive"),
            ("ALI", "Float like a butterfly"),
            ("RUTH", "Babe of baseball"),
            ("KOBE", "Black Mamba"),
        ],
    },
    Category {
        id: "tech",
        name: "Tech & Trends",
        words: &[
            ("APPLE", "iPhone maker"),
            ("TIKTOK", "Short video app"),
            ("TESLA", "Electric car giant"),
            ("AMAZON", "Prime delivery"),
            ("GOOGLE", "Search engine giant"),
            ("VIRAL", "Spreads fast online"),
            ("MEME", "Funny internet picture"),
            ("WIFI", "Wireless internet"),
            ("CRYPTO", "Digital currency"),
        ],
    },
];

/// Categories by lowercase id and lowercase name
static INDEX: Lazy<AHashMap<String, &'static Category>> = Lazy::new(|| {
    CATEGORIES
        .iter()
        .flat_map(|c| vec![(c.id.to_string(), c), (c.name.to_lowercase(), c)])
        .collect()
});

/// Seed words for `topic` when it names a stock category, followed by the general list.
/// Answers may repeat between the two.
pub fn emergency_words(topic: &str) -> Vec<WordCandidate> {
    let seeds = INDEX
        .get(&topic.trim().to_lowercase())
        .map_or(&[][..], |c| c.words);
    seeds
        .iter()
        .chain(GENERAL)
        .map(|&(answer, clue)| WordCandidate::new(answer, clue))
        .collect()
}
