// vim: set ai et ts=4 sw=4 sts=4:
use std::fs;
use std::path::Path;
use std::collections::BTreeSet;
use yaml_rust::Yaml;

use super::grid::Error;

/// Candidate words, upper-cased and kept in sorted order.
pub type Vocabulary = BTreeSet<String>;

fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    match word.is_empty() {
        true  => None,
        false => Some(word.to_uppercase()),
    }
}

/// Reads one word per line; blank lines are skipped.
pub fn parse(text: &str) -> Vocabulary {
    text.lines()
        .filter_map(normalize)
        .collect()
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vocabulary, Error> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

/// Reads the optional `words` list of a puzzle document. A missing key yields an empty set.
pub fn from_yaml(doc: &Yaml) -> Result<Vocabulary, Error> {
    let node = &doc["words"];
    if node.is_badvalue() || node.is_null() {
        return Ok(Vocabulary::new());
    }
    let list = node.as_vec().ok_or_else(||
        Error::Vocabulary("expected `words` to be a list".to_string())
    )?;
    let mut result = Vocabulary::new();
    for entry in list {
        let word = match entry {
            Yaml::String(s)  => s.clone(),
            Yaml::Integer(i) => i.to_string(),
            _ => return Err(Error::Vocabulary(format!("unexpected entry in `words`: {:?}", entry))),
        };
        if let Some(w) = normalize(&word) {
            result.insert(w);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    #[test]
    fn parse_uppercases_and_dedups() {
        let vocab = parse("cat\nCat\n  dog \n\n");
        assert_eq!(vocab.into_iter().collect::<Vec<_>>(), vec!["CAT", "DOG"]);
    }

    #[test]
    fn yaml_words_are_optional() {
        let docs = YamlLoader::load_from_str("structure: [\"__\"]\n").unwrap();
        assert!(from_yaml(&docs[0]).unwrap().is_empty());
    }

    #[test]
    fn yaml_words_list() {
        let docs = YamlLoader::load_from_str("words:\n  - ox\n  - Ax\n").unwrap();
        let vocab = from_yaml(&docs[0]).unwrap();
        assert!(vocab.contains("OX"));
        assert!(vocab.contains("AX"));
    }

    #[test]
    fn yaml_words_must_be_a_list() {
        let docs = YamlLoader::load_from_str("words: ox\n").unwrap();
        assert!(matches!(from_yaml(&docs[0]), Err(Error::Vocabulary(_))));
    }
}
