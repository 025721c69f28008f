use passgen::{
    AlphabetEntry, ConfigError, GenerationConfig, HasRole, PassgenError, PasswordConfig,
    PasswordGenerator, Role, Rule, load_config,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use tempfile::NamedTempFile;

const DIGITS_LETTERS: &str = r#"{
    "roles": ["d", "l"],
    "chars": [
        {"role": "d", "chars": ["1", "2"]},
        {"role": "l", "chars": ["a", "b"]}
    ],
    "rules": ["{d}{l}"]
}"#;

const MIXED: &str = r#"{
    "roles": ["upper", "vowel", "digit", "symbol"],
    "chars": [
        {"role": "upper", "chars": ["B", "K", "T"]},
        {"role": "vowel", "chars": ["a", "o"]},
        {"role": "digit", "chars": ["3", "7"]},
        {"role": "digit", "chars": ["9"]},
        {"role": "symbol", "chars": ["$", "!"]}
    ],
    "rules": [
        "{upper}{vowel}",
        "{vowel}{digit}",
        "{vowel}{upper}",
        "{digit}{symbol}",
        "{symbol}{upper}",
        "{upper}{vowel}{digit}"
    ]
}"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn mixed_generator() -> PasswordGenerator {
    let (alphabet, rules) = PasswordConfig::from_json_str(MIXED)
        .unwrap()
        .into_parts()
        .unwrap();
    PasswordGenerator::new(alphabet, rules)
}

#[test]
fn test_load_from_file() {
    let file = write_config(DIGITS_LETTERS);

    let (alphabet, rules) = load_config(file.path()).unwrap();
    assert_eq!(alphabet.len(), 2);
    assert_eq!(rules, vec![Rule::new(["d", "l"]).unwrap()]);

    let generator = PasswordGenerator::from_config_file(file.path()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..25 {
        let password = generator.make_one(2, 2, &mut rng).unwrap();
        let chars: Vec<char> = password.chars().collect();
        assert_eq!(chars.len(), 2);
        assert!(['1', '2'].contains(&chars[0]), "bad first char: {}", password);
        assert!(['a', 'b'].contains(&chars[1]), "bad second char: {}", password);
    }
}

#[test]
fn test_missing_config_file() {
    let result = PasswordGenerator::from_config_file("does/not/exist.json");
    assert!(matches!(result, Err(PassgenError::Io(_))));
}

#[test]
fn test_invalid_role_in_file() {
    let file = write_config(
        r#"{"roles": ["d"], "chars": [{"role": "q", "chars": ["1"]}], "rules": ["{d}"]}"#,
    );

    let result = load_config(file.path());
    assert!(matches!(
        result,
        Err(PassgenError::Config(ConfigError::InvalidRoleName(ref role))) if role == "q"
    ));
}

#[test]
fn test_length_contract() {
    let generator = mixed_generator();
    let mut rng = StdRng::seed_from_u64(2);

    for password in generator.make_many(4, 9, 200, &mut rng) {
        let length = password.unwrap().chars().count();
        assert!((4..=9).contains(&length), "length {} out of range", length);
    }
}

#[test]
fn test_chars_belong_to_their_role() {
    let generator = mixed_generator();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        for picked in generator.make_chars(12, &mut rng) {
            let picked = picked.unwrap();
            let owned = generator
                .alphabet()
                .iter()
                .filter(|entry| entry.role() == picked.role())
                .any(|entry| entry.chars().iter().any(|c| c == picked.value));
            assert!(owned, "{} is not a {} character", picked.value, picked.role);
        }
    }
}

#[test]
fn test_adjacent_roles_follow_rules() {
    let generator = mixed_generator();
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..100 {
        let history: Vec<Role> = generator
            .make_chars(15, &mut rng)
            .map(|picked| picked.unwrap().role.clone())
            .collect();

        assert!(
            generator
                .rules()
                .iter()
                .any(|rule| rule.first_role() == &history[0])
        );

        for i in 1..history.len() {
            let prefix = &history[..i];
            let next = &history[i];
            let allowed = generator
                .rules()
                .iter()
                .filter(|rule| rule.matches(prefix))
                .any(|rule| rule.last_role() == next);
            assert!(allowed, "no rule lets {} follow {:?}", next, prefix);
        }
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let generator = mixed_generator();
    let config = GenerationConfig {
        min_len: 6,
        max_len: 10,
        count: 30,
        seed: Some(1234),
    };

    let run = || -> Vec<String> {
        let mut rng = config.rng();
        generator
            .generate(&config, &mut rng)
            .collect::<passgen::Result<_>>()
            .unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_partial_results_survive_failure() {
    // A digit can only be followed by a letter, and a letter by nothing
    let file = write_config(DIGITS_LETTERS);
    let generator = PasswordGenerator::from_config_file(file.path()).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let mut produced = Vec::new();
    let mut failure = None;
    for picked in generator.make_chars(5, &mut rng) {
        match picked {
            Ok(picked) => produced.push(picked.value.to_string()),
            Err(err) => failure = Some(err),
        }
    }

    assert_eq!(produced.len(), 2);
    assert!(matches!(
        failure,
        Some(PassgenError::NoMatchingRule { ref history }) if history == "d, l"
    ));
}

#[test]
fn test_missing_alphabet_role() {
    let generator = PasswordGenerator::new(
        vec![AlphabetEntry::new("d", ["1", "2"]).unwrap()],
        vec![Rule::new(["d", "l"]).unwrap()],
    );
    let mut rng = StdRng::seed_from_u64(6);

    let result = generator.make_one(2, 2, &mut rng);
    assert!(matches!(
        result,
        Err(PassgenError::NoCharsForRole(ref role)) if role == "l"
    ));
}

#[test]
fn test_oversized_length_reports_dead_end() {
    let file = write_config(DIGITS_LETTERS);
    let generator = PasswordGenerator::from_config_file(file.path()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let length = usize::MAX / 2;

    let result = generator.make_one(length, length, &mut rng);
    assert!(matches!(result, Err(PassgenError::NoMatchingRule { .. })));
}

#[test]
fn test_nested_choice_favours_small_entries() {
    // One entry holds a single char, the other nine; picking the entry first
    // gives the lone char about half of the draws
    let generator = PasswordGenerator::new(
        vec![
            AlphabetEntry::new("x", ["#"]).unwrap(),
            AlphabetEntry::new("x", ["1", "2", "3", "4", "5", "6", "7", "8", "9"]).unwrap(),
        ],
        vec![Rule::new(["x"]).unwrap()],
    );
    let mut rng = StdRng::seed_from_u64(7);
    let role = Role::from("x");

    let draws = 4000;
    let hashes = (0..draws)
        .filter(|_| generator.get_char(&role, &mut rng).unwrap().value == "#")
        .count();
    assert!(
        (1600..2400).contains(&hashes),
        "expected about half of the draws, got {}",
        hashes
    );
}
