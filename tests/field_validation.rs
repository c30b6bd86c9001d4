use notebook_cover::document::FieldRole;
use notebook_cover::CoverEditor;

fn blank_editor(filler: &str) -> CoverEditor {
    let mut editor = CoverEditor::default();
    for role in FieldRole::ALL {
        editor.set_field(role, filler);
    }
    editor
}

#[test]
fn all_blank_fields_are_reported() {
    for filler in ["", "   ", "\t\n"] {
        let mut editor = blank_editor(filler);
        assert!(!editor.validate_all());
        assert_eq!(editor.errors().len(), 5);
        for role in FieldRole::ALL {
            assert_eq!(editor.errors().get(role), Some(role.required_message()));
        }
    }
}

#[test]
fn filled_fields_pass() {
    let mut editor = blank_editor("x");
    assert!(editor.validate_all());
    assert!(editor.errors().is_empty());
}

#[test]
fn typing_clears_only_that_error() {
    let mut editor = blank_editor("");
    editor.validate_all();

    editor.set_field(FieldRole::Name, "Lina");
    assert_eq!(editor.errors().get(FieldRole::Name), None);
    assert_eq!(editor.errors().len(), 4);

    // whitespace does not count as content
    editor.set_field(FieldRole::Subject, "  ");
    assert!(editor.errors().get(FieldRole::Subject).is_some());
}

#[test]
fn editing_never_adds_errors() {
    let mut editor = CoverEditor::default();
    editor.set_field(FieldRole::SchoolYear, "");
    assert!(editor.errors().is_empty());
    // raw text is stored untrimmed
    editor.set_field(FieldRole::ClassName, "  4B ");
    assert_eq!(editor.field(FieldRole::ClassName), "  4B ");
}
