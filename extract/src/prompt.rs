//! Instruction text sent to the vision model and the keys it must return.

/// JSON key for the built-up area, in square feet.
pub const AREA_KEY: &str = "Built-up area (sq. ft.)";

/// JSON key for the window count.
pub const WINDOWS_KEY: &str = "Windows count";

/// JSON key for the door count.
pub const DOORS_KEY: &str = "Doors count";

/// Default instruction sent with every floor-plan image.
pub const FLOOR_PLAN_PROMPT: &str = r#"Analyze the provided 2D house plan image and extract precise construction details:

1. Built-up area (sq. ft.): the total built-up area, obtained by summing the areas of all rooms, hallways and other enclosed spaces shown on the plan. Report it in square feet.

2. Windows count: the number of windows. Windows are usually drawn as thin line-like structures along the walls and may be labeled w1, w2, and so on.

3. Doors count: the number of doors. Doors are usually drawn as arcs swinging at an angle from the wall.

Respond with a single JSON object exactly like this, and nothing else:
{
    "Built-up area (sq. ft.)": 607.94,
    "Windows count": 5,
    "Doors count": 3
}"#;
