//! Integration test for the upload completion flow over in-memory stores

use std::sync::Arc;

use uploadfields::{
    AttachOutcome, DefinitionRecord, FieldRegistry, MemoryCategoryStore, MemoryDefinitionStore,
    MemoryMessageStore, MemoryPageStore, PageStore, SubmittedValues, UploadComplete, WikiContext,
};

fn wiki() -> (
    WikiContext,
    Arc<MemoryDefinitionStore>,
    Arc<MemoryMessageStore>,
    Arc<MemoryCategoryStore>,
    Arc<MemoryPageStore>,
) {
    let definitions = Arc::new(MemoryDefinitionStore::new());
    let messages = Arc::new(MemoryMessageStore::new());
    let categories = Arc::new(MemoryCategoryStore::new());
    let pages = Arc::new(MemoryPageStore::new());
    let ctx = WikiContext::new(
        definitions.clone(),
        messages.clone(),
        categories.clone(),
        pages.clone(),
    );
    (ctx, definitions, messages, categories, pages)
}

#[test]
fn test_full_upload_flow() {
    // Setup: a wiki with four defined fields and two known categories
    let (ctx, definitions, messages, categories, pages) = wiki();
    definitions.add(DefinitionRecord::new(1, "UploadField-select-license"));
    definitions.add(DefinitionRecord::new(2, "UploadField-text-artist"));
    definitions.add(DefinitionRecord::new(3, "UploadField-textarea-notes"));
    definitions.add(DefinitionRecord::new(4, "UploadField-category-topic"));
    messages.set(
        "UploadField-select-license",
        "*cc-by-sa|CC BY-SA\n*public-domain|Public domain",
    );
    categories.add("Music");
    categories.add("History");

    let registry = FieldRegistry::new(ctx);

    // The form shows every field, keyed by label in definition order
    let fields = registry.load_all().unwrap();
    assert_eq!(fields.len(), 4);
    let descriptors = registry.form_descriptors(&fields).unwrap();
    let labels: Vec<&str> = descriptors.keys().map(String::as_str).collect();
    assert_eq!(labels, ["License", "Artist", "Notes", "Topic"]);

    // Wire shape of one descriptor, as the form layer sees it
    let json = serde_json::to_value(&descriptors["License"]).unwrap();
    assert_eq!(json["widget"], "select");
    assert_eq!(json["fieldname"], "license");
    assert_eq!(json["options"]["CC BY-SA"], "cc-by-sa");

    // Upload completes with three of the four fields filled in; one
    // submitted category is unknown to the wiki and drops out
    let mut values = SubmittedValues::new();
    values.insert("license", "cc-by-sa");
    values.insert("artist", "Someone");
    values.insert("topic", vec!["music", "Unknown"]);

    let outcome = UploadComplete::new("File:Song.ogg")
        .with_summary("A short tune")
        .with_values(values.clone())
        .execute(&registry)
        .unwrap();
    assert_eq!(outcome, AttachOutcome::Attached);

    assert_eq!(
        pages.read("File:Song.ogg").unwrap().unwrap(),
        "{{FileInfo\n\
         |summary=A short tune\n\
         |license=cc-by-sa\n\
         |artist=Someone\n\
         |category=Category:Music\n\
         }}"
    );

    // The write is quiet: automatic summary, kept out of recent changes
    let options = pages.last_edit_options().unwrap();
    assert_eq!(options.summary, "");
    assert!(options.automatic_summary);
    assert!(options.suppress_recent_changes);

    // Completing the same upload again leaves the page alone
    let again = UploadComplete::new("File:Song.ogg")
        .with_summary("A short tune")
        .with_values(values)
        .execute(&registry)
        .unwrap();
    assert_eq!(again, AttachOutcome::AlreadyTagged);
    assert!(pages
        .read("File:Song.ogg")
        .unwrap()
        .unwrap()
        .starts_with("{{FileInfo\n|summary=A short tune\n"));
}

#[test]
fn test_attach_preserves_an_existing_description() {
    let (ctx, definitions, _, _, pages) = wiki();
    definitions.add(DefinitionRecord::new(1, "UploadField-text-artist"));
    pages.put("File:Photo.jpg", "A photo from 1950.");

    let registry = FieldRegistry::new(ctx);
    let outcome = UploadComplete::new("File:Photo.jpg")
        .with_value("artist", "someone")
        .execute(&registry)
        .unwrap();
    assert_eq!(outcome, AttachOutcome::Attached);
    assert_eq!(
        pages.read("File:Photo.jpg").unwrap().unwrap(),
        "A photo from 1950.\n\n{{FileInfo\n|summary=\n|artist=someone\n}}"
    );
}

#[test]
fn test_reupload_never_touches_the_page() {
    let (ctx, definitions, _, _, pages) = wiki();
    definitions.add(DefinitionRecord::new(1, "UploadField-text-artist"));
    pages.put("File:Photo.jpg", "A photo from 1950.");

    let registry = FieldRegistry::new(ctx);
    let outcome = UploadComplete::new("File:Photo.jpg")
        .with_summary("replacement scan")
        .with_value("artist", "someone")
        .for_reupload()
        .execute(&registry)
        .unwrap();
    assert_eq!(outcome, AttachOutcome::ReUpload);
    assert_eq!(
        pages.read("File:Photo.jpg").unwrap().unwrap(),
        "A photo from 1950."
    );
    assert!(pages.last_edit_options().is_none());
}

#[test]
fn test_values_under_unknown_keys_are_ignored() {
    let (ctx, definitions, _, _, pages) = wiki();
    definitions.add(DefinitionRecord::new(1, "UploadField-text-artist"));

    let registry = FieldRegistry::new(ctx);
    let outcome = UploadComplete::new("File:Song.ogg")
        .with_value("bogus", "x")
        .execute(&registry)
        .unwrap();
    assert_eq!(outcome, AttachOutcome::NothingToAttach);
    assert_eq!(pages.read("File:Song.ogg").unwrap(), None);
}

#[test]
fn test_multiselect_values_join_with_commas() {
    let (ctx, definitions, messages, _, pages) = wiki();
    definitions.add(DefinitionRecord::new(1, "UploadField-multiselect-styles"));
    messages.set("UploadField-multiselect-styles", "*rock\n*jazz\n*blues");

    let registry = FieldRegistry::new(ctx);
    let outcome = UploadComplete::new("File:Song.ogg")
        .with_value("styles", vec!["rock", "blues"])
        .execute(&registry)
        .unwrap();
    assert_eq!(outcome, AttachOutcome::Attached);
    assert_eq!(
        pages.read("File:Song.ogg").unwrap().unwrap(),
        "{{FileInfo\n|summary=\n|styles=rock,blues\n}}"
    );
}
