use termfilter::{filter_dataset, load_vocabulary, Dataset, FilterConfig, MatchTermFormat};

const WORDS: &[&str] = &[
    "alert", "breaking", "news", "today", "calm", "sale", "new", "year", "#eleições", "café",
];

fn synthetic_dataset(rows: usize) -> Dataset {
    let mut dataset = Dataset::new(["Type", "Text", "URL", "SourceLink", "Likes"]);
    for i in 0..rows {
        let text: Vec<&str> = (0..6).map(|k| WORDS[(i * 7 + k * 3) % WORDS.len()]).collect();
        let text = text.join(" ");
        let likes = (i % 13).to_string();
        if i % 4 == 0 {
            let parent = format!("p{}", i - i % 8 + 1);
            dataset.push_record([
                "Comment".to_string(),
                text,
                format!("c{i}"),
                parent,
                likes,
            ]);
        } else {
            dataset.push_record(["Post".to_string(), text, format!("p{i}"), String::new(), likes]);
        }
    }
    dataset
}

fn run(parallel: bool, post_only: bool) -> Vec<(usize, String)> {
    let config = FilterConfig::new("Text")
        .with_metadata_columns(["Likes"])
        .with_post_only(post_only)
        .with_parallel(parallel);
    let vocabulary =
        load_vocabulary(r##"["alert", ["new", "year"], "#eleicoes", "cafe"]"##, &config).unwrap();
    let output = filter_dataset(synthetic_dataset(500), vocabulary, &config).unwrap();
    output.match_terms(&MatchTermFormat::JsonList)
}

#[test]
fn parallel_and_sequential_runs_agree() {
    assert_eq!(run(true, false), run(false, false));
    assert_eq!(run(true, true), run(false, true));
}

#[test]
fn output_keeps_input_order() {
    let rows = run(true, false);
    assert!(!rows.is_empty());
    assert!(rows.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn repeated_runs_are_identical() {
    let first = run(true, true);
    for _ in 0..3 {
        assert_eq!(run(true, true), first);
    }
}
