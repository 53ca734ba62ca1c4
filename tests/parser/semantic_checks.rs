use muffin::lexer::Location;
use muffin::parser::parse_program;
use muffin::{CompileError, CompileErrorKind};

fn muffin(ingredients: &[&str], steps: &[&str]) -> String {
    let mut source = String::from("Muffin recipe\ningredients\n");
    for line in ingredients {
        source.push_str(&format!("    {line}\n"));
    }
    source.push_str("method\n");
    for (index, line) in steps.iter().enumerate() {
        source.push_str(&format!("    {}. {line}\n", index + 1));
    }
    source
}

fn parse_error(source: &str) -> CompileError {
    match parse_program(source) {
        Err(error) => error,
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn forward_jump_must_target_a_later_step() {
    let error = parse_error(&muffin(&[], &["set up a Bowl", "proceed to step 2"]));
    assert_eq!(error.kind(), CompileErrorKind::Semantic);
    assert_eq!(error.message(), "must be a future step number");

    let error = parse_error(&muffin(&[], &["set up a Bowl", "proceed to step 1"]));
    assert_eq!(error.message(), "must be a future step number");
}

#[test]
fn backward_jump_must_target_an_earlier_positive_step() {
    for target in [0, 2, 3] {
        let step = format!("go back to step {target}");
        let error = parse_error(&muffin(&[], &["set up a Bowl", &step]));
        assert_eq!(error.message(), "must be a previous step number", "{step}");
    }
}

#[test]
fn forward_jump_must_land_inside_the_recipe() {
    let error = parse_error(&muffin(&[], &["proceed to step 3", "serves 1"]));
    assert_eq!(error.message(), "step 3 does not exist");
    assert_eq!(error.location().map(|location| location.line), Some(4));
}

#[test]
fn duplicate_recipe_names_are_rejected() {
    let source = "Muffin recipe\ningredients\nmethod\nMuffin recipe\ningredients\nmethod\n";
    let error = parse_error(source);
    assert_eq!(error.message(), "recipe \"Muffin\" already exists");
    assert_eq!(error.location(), Some(Location::new(4, 1, 33)));
}

#[test]
fn duplicate_ingredient_names_are_rejected() {
    let error = parse_error(&muffin(&["1 Flour", "\"x\" brand Flour"], &[]));
    assert_eq!(error.message(), "ingredient \"Flour\" used twice");
}

#[test]
fn undefined_ingredients_are_rejected() {
    let error = parse_error(&muffin(&[], &["set up a Bowl", "add Flour into Bowl"]));
    assert_eq!(error.message(), "undefined ingredient \"Flour\"");
}

#[test]
fn ingredients_are_scoped_to_their_recipe() {
    let source = "\
Muffin recipe
ingredients
    1 Flour
method
    1. serve with Pancake
Pancake recipe
ingredients
method
    1. set up a Bowl
    2. add Flour into Bowl
";
    let error = parse_error(source);
    assert_eq!(error.message(), "undefined ingredient \"Flour\"");
    assert_eq!(error.location().map(|location| location.line), Some(10));
}

#[test]
fn string_ingredients_only_fit_molds() {
    let error = parse_error(&muffin(
        &["\"x\" brand Salt"],
        &["set up a Bowl", "add Salt into Bowl"],
    ));
    assert_eq!(error.message(), "can only add string ingredient to molds");

    let error = parse_error(&muffin(
        &["\"x\" brand Salt"],
        &["set up a Bowl", "remove Salt from Bowl"],
    ));
    assert_eq!(error.message(), "cannot use string type ingredient \"Salt\" here");
}

#[test]
fn quantities_must_be_positive() {
    let error = parse_error(&muffin(&[], &["serves 0"]));
    assert_eq!(error.message(), "should be positive, not 0");

    let error = parse_error(&muffin(&[], &["set up 0 Bowls"]));
    assert_eq!(error.message(), "should be positive, not 0");
}

#[test]
fn ratio_left_hand_side_is_fixed() {
    let error = parse_error(&muffin(&[], &["add water to Bowl at a 2 : 3 ratio"]));
    assert_eq!(error.message(), "left hand side of ratio must be 1, not 2");

    let error = parse_error(&muffin(&[], &["add water to Bowl at a 1 : 0 ratio"]));
    assert_eq!(error.message(), "should be positive, not 0");
}

#[test]
fn oven_only_knows_four_temperatures() {
    let error = parse_error(&muffin(&[], &["place Bowl in the oven and bake at 200C"]));
    assert_eq!(error.message(), "our oven can't be set to 200C!");
}

#[test]
fn ordinals_start_at_one() {
    let error = parse_error(&muffin(&[], &["clean 0th Bowl"]));
    assert_eq!(error.message(), "invalid ordinal 0");
}

#[test]
fn served_recipes_must_exist() {
    let error = parse_error(&muffin(&[], &["serve with Pancake"]));
    assert_eq!(error.message(), "undefined recipe \"Pancake\"");
    assert_eq!(error.location(), Some(Location::new(4, 19, 51)));
}

#[test]
fn program_needs_a_muffin_recipe() {
    let error = parse_error("Pancake recipe\ningredients\nmethod\n    1. serves 1\n");
    assert_eq!(error.message(), "no \"Muffin\" recipe found");
    assert_eq!(error.location(), None);
    assert_eq!(error.to_string(), "no \"Muffin\" recipe found");

    let error = parse_error("");
    assert_eq!(error.message(), "no \"Muffin\" recipe found");
}

#[test]
fn duplicate_recipe_is_reported_at_its_header_after_its_body() {
    let source = "\
Muffin recipe
ingredients
method
    1. serves 1
Muffin recipe
ingredients
    2 Eggs
method
    1. set up a Bowl
    2. add Eggs into Bowl
";
    let error = parse_error(source);
    assert_eq!(error.kind(), CompileErrorKind::Semantic);
    assert_eq!(error.message(), "recipe \"Muffin\" already exists");
    assert_eq!(error.location().map(|location| location.line), Some(5));
}
