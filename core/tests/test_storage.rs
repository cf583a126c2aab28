// core/tests/test_storage.rs
use std::fs;

use paradeguard_core::{
    push_recent, FileRecentSearchStore, MemoryRecentSearchStore, RecentSearch, RecentSearchStore,
    MAX_RECENT_SEARCHES,
};

fn search(id: &str, name: &str) -> RecentSearch {
    RecentSearch {
        id: id.to_string(),
        name: name.to_string(),
        latitude: 43.24,
        longitude: 76.89,
    }
}

#[test]
fn test_push_recent_dedupes_and_caps_at_five() {
    let mut list = Vec::new();
    for i in 0..7 {
        push_recent(&mut list, search(&format!("id{i}"), &format!("Sted {i}")));
    }
    assert_eq!(list.len(), MAX_RECENT_SEARCHES);
    // nyeste først, eldste falt ut
    assert_eq!(list[0].id, "id6");
    assert!(list.iter().all(|s| s.id != "id0" && s.id != "id1"));

    // samme id igjen: flyttes til front uten duplikat
    push_recent(&mut list, search("id4", "Sted 4 igjen"));
    assert_eq!(list.len(), MAX_RECENT_SEARCHES);
    assert_eq!(list[0].id, "id4");
    assert_eq!(list[0].name, "Sted 4 igjen");
    assert_eq!(list.iter().filter(|s| s.id == "id4").count(), 1);
}

#[test]
fn test_file_store_save_and_load() {
    let path = "tests/tmp_recent_searches.json";
    let _ = fs::remove_file(path);

    let store = FileRecentSearchStore::new(path);

    // lag en liten liste
    let mut list = Vec::new();
    push_recent(&mut list, search("almaty", "Almaty"));
    push_recent(&mut list, search("oslo", "Oslo"));

    store.save(&list).expect("kunne ikke lagre nylige søk");

    let loaded = store.load();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, "oslo");
    assert_eq!(loaded[1].name, "Almaty");

    // siste-skriver-vinner: ny liste overskriver hele filen
    push_recent(&mut list, search("tokyo", "Tokyo"));
    store.save(&list).expect("kunne ikke overskrive");
    assert_eq!(store.load().len(), 3);

    fs::remove_file(path).ok();
}

#[test]
fn test_file_store_tolerates_missing_and_corrupt_file() {
    let missing = FileRecentSearchStore::new("tests/finnes_ikke.json");
    assert!(missing.load().is_empty());

    let path = "tests/tmp_corrupt_recent.json";
    fs::write(path, "{absolutt ikke json").expect("kunne ikke skrive testfil");
    let corrupt = FileRecentSearchStore::new(path);
    assert!(corrupt.load().is_empty(), "korrupt fil skal gi tom liste, ikke feil");
    fs::remove_file(path).ok();
}

#[test]
fn test_memory_store_roundtrip() {
    let store = MemoryRecentSearchStore::default();
    assert!(store.load().is_empty());

    let list = vec![search("a", "A"), search("b", "B")];
    store.save(&list).expect("minnelager feiler aldri");
    assert_eq!(store.load(), list);
}
