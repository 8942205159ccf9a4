//! Formatting weather readings for a two-line, 16-column character display.

use crate::data::JsonValue;
use std::iter;

/// Width of a display line.
pub const LCD_COLUMNS: usize = 16;

/// A reading that can be shown on one line of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
    Condition,
    Wind,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Temperature,
        Field::Humidity,
        Field::Condition,
        Field::Wind,
    ];

    /// The field shown after this one when the display cycles.
    pub fn next(self) -> Field {
        match self {
            Field::Temperature => Field::Humidity,
            Field::Humidity => Field::Condition,
            Field::Condition => Field::Wind,
            Field::Wind => Field::Temperature,
        }
    }

    /// Renders this field from the `current` object of a weather response as a line of
    /// exactly [LCD_COLUMNS] characters. `None` if a value is missing or has the wrong type.
    pub fn render(self, current: &JsonValue<'_>) -> Option<String> {
        let text = match self {
            Field::Temperature => format!("Temp: {:8.3} F", current.get("temp_f")?.as_f64()?),
            Field::Humidity => format!("Humidity: {:5.2}%", current.get("humidity")?.as_f64()?),
            Field::Condition => current
                .get_path(&["condition", "text"])?
                .as_json_str()?
                .to_string(),
            Field::Wind => {
                let speed = current.get("wind_mph")?.as_f64()?;
                let direction = current.get("wind_dir")?.as_json_str()?;
                format!("Wind: {speed:3.1} mph {direction:<2}")
            }
        };
        Some(fit_line(&text))
    }
}

/// The two fields currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub top: Field,
    pub bottom: Field,
}

impl Screen {
    /// Moves both lines on to their next field.
    pub fn cycle(&mut self) {
        self.top = self.top.next();
        self.bottom = self.bottom.next();
    }

    /// Renders both lines from a whole weather response, whose readings live under
    /// `current`. A line that can't be rendered is `None`.
    pub fn render(&self, document: &JsonValue<'_>) -> [Option<String>; 2] {
        match document.get("current") {
            Some(current) => [self.top.render(current), self.bottom.render(current)],
            None => [None, None],
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            top: Field::Temperature,
            bottom: Field::Humidity,
        }
    }
}

fn fit_line(text: &str) -> String {
    /* Truncates or pads with spaces to exactly one display line */
    let mut line: String = text.chars().take(LCD_COLUMNS).collect();
    let missing = LCD_COLUMNS - line.chars().count();
    line.extend(iter::repeat(' ').take(missing));
    line
}
