use muffin::parser::parse_program;
use proptest::prelude::*;

const MAX_INPUT_BYTES: usize = 256;

/// Step lines that are valid anywhere after the two set-up steps.
const STEP_POOL: &[&str] = &[
    "add Flour into Bowl",
    "remove Flour from 2nd Bowl",
    "clean Bowl",
    "add water to 2nd Bowl at a 1 : 3 ratio",
    "pour half of contents of Bowl into 2nd Bowl",
    "pour contents of 2nd Bowl into Cake Mold",
    "add Salt into Cake Mold",
    "remove a layer from Cake Mold and dump into Bowl",
    "microwave Cake Mold in grill mode",
    "whip the mixture in Cake Mold",
    "place Bowl in the oven and bake at 190C",
    "if Cake Mold is empty, go back to step 1",
];

fn program_with(steps: &[usize]) -> String {
    let mut source = String::from(
        "Muffin recipe\ningredients\n    2 Flour\n    \"s\" brand Salt\nmethod\n    1. set up 2 Bowls\n    2. set up a Cake Mold\n",
    );
    for (index, pick) in steps.iter().enumerate() {
        source.push_str(&format!("    {}. {}\n", index + 3, STEP_POOL[*pick]));
    }
    source
}

proptest! {
    #[test]
    fn parser_handles_lossy_utf8_inputs_without_panicking(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES)
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let _ = parse_program(&input);
    }

    #[test]
    fn parser_handles_recipe_shaped_noise(
        input in "(Muffin recipe\n|ingredients\n|method\n|[0-9]{1,2}\\. |set up a |Bowl|Cake Mold| |\n|,|serves [0-9])*"
    ) {
        let _ = parse_program(&input);
    }

    #[test]
    fn generated_programs_parse_with_every_step(
        picks in proptest::collection::vec(0..STEP_POOL.len(), 0..40)
    ) {
        let program = parse_program(&program_with(&picks)).expect("generated program parses");
        let recipe = program.get("Muffin").expect("Muffin recipe");
        prop_assert_eq!(recipe.steps.len(), picks.len() + 2);
    }
}
