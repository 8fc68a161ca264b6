use shiok_domain::category::Category;

#[test]
fn every_profile_is_populated() {
    for category in Category::ALL {
        let profile = category.profile();
        assert!(!profile.description.is_empty(), "{category} description");
        assert!(!profile.examples.is_empty(), "{category} examples");
        assert!(!profile.query_tail.trim().is_empty(), "{category} query tail");
        assert!(!profile.keywords.is_empty(), "{category} keywords");
    }
}

#[test]
fn keywords_are_lowercase() {
    for category in Category::ALL {
        for keyword in category.profile().keywords {
            assert_eq!(*keyword, keyword.to_lowercase(), "{category} keyword {keyword}");
        }
    }
}

#[test]
fn example_words_fit_the_word_format() {
    for category in Category::ALL {
        for word in category.profile().examples {
            assert!((3..=10).contains(&word.len()), "{word} length");
            assert!(word.chars().all(|c| c.is_ascii_uppercase()), "{word} charset");
        }
    }
}

#[test]
fn food_keywords_match_hawker_vocabulary() {
    let keywords = Category::Food.profile().keywords;
    for expected in ["singapore", "food", "dish", "hawker", "cuisine", "eat"] {
        assert!(keywords.contains(&expected));
    }
}

#[test]
fn category_serializes_lowercase() {
    let json = serde_json::to_string(&Category::Singlish).unwrap();
    assert_eq!(json, "\"singlish\"");
    let back: Category = serde_json::from_str("\"places\"").unwrap();
    assert_eq!(back, Category::Places);
}
