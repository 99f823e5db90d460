//! Console Command Tests
//!
//! End-to-end behavior of console commands against a temporary store:
//! - ordered diagnostics
//! - count and all listings
//! - update value coercion
//! - dotted call syntax and bulk updates
//! - destroy persisted across reload

use hbnb::console::Console;
use hbnb::model::composite_key;
use hbnb::registry::ClassName;
use hbnb::storage::FileStorage;
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn setup_console() -> (TempDir, Console<Vec<u8>>) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::open(tmp.path().join("file.json")).unwrap();
    (tmp, Console::new(storage, Vec::new()))
}

/// Runs one line and returns everything it printed.
fn run(console: &mut Console<Vec<u8>>, line: &str) -> String {
    console.onecmd(line).unwrap();
    String::from_utf8(std::mem::take(console.output_mut())).unwrap()
}

fn create(console: &mut Console<Vec<u8>>, class: &str) -> String {
    run(console, &format!("create {}", class)).trim().to_string()
}

fn field(console: &Console<Vec<u8>>, class: ClassName, id: &str, name: &str) -> serde_json::Value {
    console
        .storage()
        .get(&composite_key(class, id))
        .and_then(|record| record.get(name))
        .unwrap_or(serde_json::Value::Null)
}

// =============================================================================
// Ordered Diagnostics
// =============================================================================

#[test]
fn test_show_diagnostics_in_order() {
    let (_tmp, mut console) = setup_console();

    assert_eq!(run(&mut console, "show"), "** class name missing **\n");
    assert_eq!(run(&mut console, "show FakeClass"), "** class doesn't exist **\n");
    assert_eq!(run(&mut console, "show User"), "** instance id missing **\n");
    assert_eq!(run(&mut console, "show User 1234"), "** no instance found **\n");
}

/// An unknown class wins over a missing id.
#[test]
fn test_first_failing_check_short_circuits() {
    let (_tmp, mut console) = setup_console();

    assert_eq!(run(&mut console, "destroy FakeClass"), "** class doesn't exist **\n");
    assert_eq!(
        run(&mut console, "update FakeClass 1 name x"),
        "** class doesn't exist **\n"
    );
    assert_eq!(
        run(&mut console, "update User 1 name x"),
        "** no instance found **\n"
    );
}

#[test]
fn test_update_diagnostics_in_order() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "User");

    assert_eq!(run(&mut console, "update"), "** class name missing **\n");
    assert_eq!(run(&mut console, "update User"), "** instance id missing **\n");
    assert_eq!(
        run(&mut console, &format!("update User {}", id)),
        "** attribute name missing **\n"
    );
    assert_eq!(
        run(&mut console, &format!("update User {} first_name", id)),
        "** value missing **\n"
    );
}

#[test]
fn test_create_and_count_diagnostics() {
    let (_tmp, mut console) = setup_console();

    assert_eq!(run(&mut console, "create"), "** class name missing **\n");
    assert_eq!(run(&mut console, "create Ghost"), "** class doesn't exist **\n");
    assert_eq!(run(&mut console, "count"), "** class name missing **\n");
    assert_eq!(run(&mut console, "count Ghost"), "** class doesn't exist **\n");
    assert_eq!(run(&mut console, "all Ghost"), "** class doesn't exist **\n");
}

// =============================================================================
// Create / Show / Count / All
// =============================================================================

#[test]
fn test_create_then_show() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "BaseModel");

    let shown = run(&mut console, &format!("show BaseModel {}", id));
    assert!(shown.starts_with(&format!("[BaseModel] ({}) {{", id)));
    assert!(shown.contains(&format!("\"id\": \"{}\"", id)));
}

#[test]
fn test_count_per_class() {
    let (_tmp, mut console) = setup_console();
    for _ in 0..3 {
        create(&mut console, "User");
    }
    for _ in 0..2 {
        create(&mut console, "State");
    }

    assert_eq!(run(&mut console, "count User"), "3\n");
    assert_eq!(run(&mut console, "count State"), "2\n");
    assert_eq!(run(&mut console, "count City"), "0\n");
}

#[test]
fn test_all_filters_by_class() {
    let (_tmp, mut console) = setup_console();
    let user = create(&mut console, "User");
    let state = create(&mut console, "State");

    let users = run(&mut console, "all User");
    assert!(users.contains(&user));
    assert!(!users.contains(&state));

    let everything = run(&mut console, "all");
    assert!(everything.starts_with('['));
    assert!(everything.contains(&user) && everything.contains(&state));

    assert_eq!(run(&mut console, "all City"), "[]\n");
}

#[test]
fn test_created_ids_are_unique() {
    let (_tmp, mut console) = setup_console();
    let mut ids: Vec<String> = ClassName::ALL
        .iter()
        .cycle()
        .take(50)
        .map(|class| create(&mut console, class.as_str()))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

// =============================================================================
// Update Coercion
// =============================================================================

#[test]
fn test_update_generic_coercion() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "User");

    assert_eq!(run(&mut console, &format!("update User {} rating 3.5", id)), "");
    assert_eq!(field(&console, ClassName::User, &id, "rating"), json!(3.5));

    run(&mut console, &format!("update User {} nickname abc", id));
    assert_eq!(field(&console, ClassName::User, &id, "nickname"), json!("abc"));

    run(&mut console, &format!("update User {} age 42", id));
    assert_eq!(field(&console, ClassName::User, &id, "age"), json!(42));

    run(&mut console, &format!("update User {} zip \"02139\"", id));
    assert_eq!(field(&console, ClassName::User, &id, "zip"), json!("02139"));
}

#[test]
fn test_update_declared_coercion_takes_precedence() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "Place");

    run(&mut console, &format!("update Place {} number_rooms \"7\"", id));
    assert_eq!(field(&console, ClassName::Place, &id, "number_rooms"), json!(7));

    run(&mut console, &format!("update Place {} latitude 12", id));
    assert_eq!(field(&console, ClassName::Place, &id, "latitude"), json!(12.0));

    // Declared text: a number stays text
    run(&mut console, &format!("update Place {} name 42", id));
    assert_eq!(field(&console, ClassName::Place, &id, "name"), json!("42"));
}

#[test]
fn test_update_quoted_value_with_spaces() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "User");

    run(
        &mut console,
        &format!("update User {} first_name \"Betty Holberton\"", id),
    );
    assert_eq!(
        field(&console, ClassName::User, &id, "first_name"),
        json!("Betty Holberton")
    );
}

#[test]
fn test_update_refreshes_updated_at() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "Review");
    let key = composite_key(ClassName::Review, &id);
    let before = console.storage().get(&key).unwrap().updated_at();

    run(&mut console, &format!("update Review {} text \"Great\"", id));
    let record = console.storage().get(&key).unwrap();
    assert!(record.updated_at() >= before);
    assert!(record.updated_at() >= record.created_at());
}

// =============================================================================
// Dotted Syntax
// =============================================================================

#[test]
fn test_dotted_calls() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "City");

    assert_eq!(run(&mut console, "City.count()"), "1\n");
    assert!(run(&mut console, "City.all()").contains(&id));
    assert!(run(&mut console, &format!("City.show(\"{}\")", id)).contains(&id));

    run(
        &mut console,
        &format!("City.update(\"{}\", \"name\", \"San Francisco\")", id),
    );
    assert_eq!(
        field(&console, ClassName::City, &id, "name"),
        json!("San Francisco")
    );

    assert_eq!(run(&mut console, &format!("City.destroy(\"{}\")", id)), "");
    assert_eq!(run(&mut console, "City.count()"), "0\n");
}

#[test]
fn test_dotted_calls_report_diagnostics() {
    let (_tmp, mut console) = setup_console();

    assert_eq!(run(&mut console, "Ghost.all()"), "** class doesn't exist **\n");
    assert_eq!(run(&mut console, "User.show()"), "** instance id missing **\n");
    assert_eq!(
        run(&mut console, "User.show(\"nope\")"),
        "** no instance found **\n"
    );
}

#[test]
fn test_bulk_update_with_dictionary() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "Place");

    let line = format!(
        "Place.update(\"{}\", {{'name': 'Loft', 'max_guest': '4', 'pets': true}})",
        id
    );
    assert_eq!(run(&mut console, &line), "");
    assert_eq!(field(&console, ClassName::Place, &id, "name"), json!("Loft"));
    assert_eq!(field(&console, ClassName::Place, &id, "max_guest"), json!(4));
    assert_eq!(field(&console, ClassName::Place, &id, "pets"), json!(true));
}

#[test]
fn test_bulk_update_rejected_pair_leaves_record() {
    let (_tmp, mut console) = setup_console();
    let id = create(&mut console, "Place");

    let line = format!(
        "Place.update(\"{}\", {{\"name\": \"Loft\", \"max_guest\": \"lots\"}})",
        id
    );
    assert_eq!(run(&mut console, &line), "** invalid value for max_guest **\n");
    assert_eq!(field(&console, ClassName::Place, &id, "name"), json!(null));

    let malformed = format!("Place.update(\"{}\", {{name: }})", id);
    assert_eq!(run(&mut console, &malformed), "** invalid dictionary **\n");
}

// =============================================================================
// Persistence
// =============================================================================

/// Destroyed records stay gone after a reload from disk.
#[test]
fn test_destroy_then_reload() {
    let (tmp, mut console) = setup_console();
    let kept = create(&mut console, "Amenity");
    let gone = create(&mut console, "Amenity");

    assert_eq!(run(&mut console, &format!("destroy Amenity {}", gone)), "");

    let reloaded = FileStorage::open(tmp.path().join("file.json")).unwrap();
    assert!(reloaded.contains(&composite_key(ClassName::Amenity, &kept)));
    assert!(!reloaded.contains(&composite_key(ClassName::Amenity, &gone)));
}

#[test]
fn test_updates_survive_restart() {
    let (tmp, mut console) = setup_console();
    let id = create(&mut console, "State");
    run(&mut console, &format!("update State {} name \"California\"", id));
    drop(console);

    let storage = FileStorage::open(tmp.path().join("file.json")).unwrap();
    let mut console = Console::new(storage, Vec::new());
    let shown = run(&mut console, &format!("show State {}", id));
    assert!(shown.contains("\"name\": \"California\""));
}
