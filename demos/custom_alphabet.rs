use passgen::{AlphabetEntry, GenerationConfig, PasswordConfig, PasswordGenerator, Rule};
use std::error::Error;

/// Example of building password grammars in code and from JSON
fn main() -> Result<(), Box<dyn Error>> {
    // Example 1: Pronounceable passwords built programmatically
    let alphabet = vec![
        AlphabetEntry::new("consonant", ["b", "d", "f", "k", "m", "r", "t"])?,
        AlphabetEntry::new("vowel", ["a", "e", "i", "o", "u"])?,
        AlphabetEntry::new("digit", ["2", "4", "6", "8"])?,
    ];
    let rules = vec![
        Rule::from_template("{consonant}{vowel}")?,
        Rule::from_template("{vowel}{consonant}")?,
        Rule::from_template("{consonant}{vowel}{digit}")?,
        Rule::from_template("{digit}{consonant}")?,
    ];
    let generator = PasswordGenerator::new(alphabet, rules);

    let config = GenerationConfig {
        seed: Some(2011),
        ..GenerationConfig::default()
    };
    let mut rng = config.rng();

    println!("Pronounceable passwords (seed {:?}):", config.seed);
    for password in generator.generate(&config, &mut rng) {
        let password = password?;
        println!("{} [{}]", password, password.chars().count());
    }

    // Example 2: Syllable tokens loaded from JSON, entries with a shared role
    let json = r#"{
        "roles": ["syllable", "separator"],
        "chars": [
            {"role": "syllable", "chars": ["ka", "zu", "mi"]},
            {"role": "syllable", "chars": ["tor"]},
            {"role": "separator", "chars": ["-", "."]}
        ],
        "rules": ["{syllable}{syllable}", "{syllable}{syllable}{separator}", "{separator}{syllable}"]
    }"#;
    let (alphabet, rules) = PasswordConfig::from_json_str(json)?.into_parts()?;
    let generator = PasswordGenerator::new(alphabet, rules);

    let mut rng = GenerationConfig::default().rng();
    println!("\nSyllable passwords:");
    for password in generator.make_many(4, 6, 5, &mut rng) {
        println!("{}", password?);
    }

    Ok(())
}
