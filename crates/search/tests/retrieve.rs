use finguide_corpus::{Corpus, Document};
use finguide_search::{DomainBoost, RetrievalConfig, Retriever};
use proptest::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, text).expect("write doc");
}

fn finance_kb() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    write(
        root,
        "budgeting.txt",
        "A budget tracks income and expenses. The 50/30/20 rule splits income into needs, wants and savings.",
    );
    write(
        root,
        "hf_finance/index_funds.txt",
        "Index funds hold every stock in an index. Low fees and broad diversification reduce risk.",
    );
    write(
        root,
        "debt.txt",
        "Paying down debt with a 20% APR beats most investment returns. Avoid minimum payments on $5,000 balances.",
    );
    write(root, "empty.txt", "   \n  ");
    write(root, "notes.md", "index funds risk diversification");
    temp
}

fn on_disk(root: &Path) -> Retriever {
    Retriever::new(&RetrievalConfig::default().with_root(root))
}

#[test]
fn retrieves_from_disk_with_labels() {
    let kb = finance_kb();
    let retriever = on_disk(kb.path());

    let context = retriever.retrieve("index fund fees and diversification", 3, 800);

    assert!(context.starts_with("[Source: index_funds.txt]\nIndex funds hold every stock"));
    assert!(!context.contains("notes.md"));
}

#[test]
fn currency_and_percent_tokens_match() {
    let kb = finance_kb();
    let retriever = on_disk(kb.path());

    let ranked = retriever.rank("is a 20% apr bad");
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].document.name(), "debt.txt");
}

#[test]
fn repeated_calls_are_identical() {
    let kb = finance_kb();
    let retriever = on_disk(kb.path());

    let first = retriever.retrieve("income savings risk debt", 3, 120);
    let second = retriever.retrieve("income savings risk debt", 3, 120);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn corpus_is_loaded_once() {
    let kb = finance_kb();
    let retriever = on_disk(kb.path());
    assert!(!retriever.cache().is_loaded());

    let before = retriever.retrieve("mortgage", 3, 800);
    write(kb.path(), "mortgage.txt", "A mortgage is a loan secured by property.");
    let after = retriever.retrieve("mortgage", 3, 800);

    assert_eq!(before, "");
    assert_eq!(after, "");
    assert_eq!(retriever.corpus().len(), 4);
}

#[test]
fn missing_root_gives_empty_context() {
    let temp = TempDir::new().expect("tempdir");
    let retriever = on_disk(&temp.path().join("missing"));
    assert_eq!(retriever.retrieve("budget", 3, 800), "");
}

#[test]
fn stopword_only_query_is_empty() {
    let kb = finance_kb();
    let retriever = on_disk(kb.path());
    assert_eq!(retriever.retrieve("the and of", 3, 800), "");
}

#[test]
fn marked_twin_scores_exactly_boost_factor_more() {
    let kb = TempDir::new().expect("tempdir");
    let text = "Rebalancing keeps an allocation near its target.";
    write(kb.path(), "general/rebalancing.txt", text);
    write(kb.path(), "HF_Finance/rebalancing.txt", text);

    let retriever = on_disk(kb.path());
    let ranked = retriever.rank("rebalancing allocation");

    assert_eq!(ranked.len(), 2);
    assert!(ranked[0].document.relative_path().starts_with("HF_Finance"));
    assert_eq!(ranked[0].score, ranked[1].score * 1.3);
}

fn memory_retriever(texts: &[String]) -> Retriever {
    let root = Path::new("/kb");
    let documents = texts
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            Document::new(root.join(format!("doc_{idx:02}.txt")), root, text.as_str())
                .expect("document")
        })
        .collect();
    Retriever::from_corpus(Corpus::new(root, documents), DomainBoost::default())
}

const WORDS: &[&str] = &["budget", "risk", "fees", "the", "bond", "$100", "5%", "and"];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn proptest_smaller_budget_is_prefix(
        texts in prop::collection::vec(text_strategy(), 1..6),
        query in text_strategy(),
        k in 0usize..5,
        small in 0usize..60,
        extra in 0usize..60,
    ) {
        let retriever = memory_retriever(&texts);
        let narrow = retriever.retrieve(&query, k, small);
        let wide = retriever.retrieve(&query, k, small + extra);
        prop_assert!(wide.starts_with(&narrow), "narrow={narrow:?} wide={wide:?}");
    }

    #[test]
    fn proptest_excerpts_respect_budget(
        texts in prop::collection::vec(text_strategy(), 1..6),
        query in text_strategy(),
        k in 0usize..5,
        max_chars in 0usize..80,
    ) {
        let retriever = memory_retriever(&texts);
        let bundle = retriever.bundle(&query, k, max_chars);
        let excerpt_chars: usize = bundle.blocks().iter().map(|b| b.excerpt.chars().count()).sum();
        prop_assert!(excerpt_chars <= max_chars);
        prop_assert!(bundle.len() <= k.max(1));
    }
}
