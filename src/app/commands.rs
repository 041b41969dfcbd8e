//! Line command parsing for the terminal client.
//!
//! Turns lines like `ingredients eggs, flour` or `rate 4` into [`Event`]s.
//! Commands that act on "the open recipe" take the id of the recipe shown in
//! the detail panel when none is given.

use super::handler::Event;
use crate::domain::recipe::{ExportFormat, RecipeEdit, RecipeId};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed an event to the handler.
    Event(Event),
    /// Show help: help
    Help,
    /// Leave the client: quit
    Quit,
    /// Nothing to do
    Empty,
    /// Unusable input, with a message for the user.
    Invalid(String),
}

impl Command {
    /// Parse one input line; `open_recipe` is the recipe in the detail panel.
    #[must_use]
    pub fn parse(input: &str, open_recipe: Option<RecipeId>) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Empty;
        }

        let (cmd, args) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(cmd, args)| (cmd, args.trim()));
        let cmd = cmd.to_lowercase();

        let event = match cmd.as_str() {
            "ingredients" | "i" => Event::IngredientsChanged(args.to_string()),
            "diet" | "dietary" => Event::DietaryChanged(args.to_string()),
            "cuisine" => Event::CuisineChanged(args.to_string()),
            "servings" => match args.parse::<u32>() {
                Ok(servings) => Event::ServingSizeChanged(servings),
                Err(_) => return Self::usage("servings <1-12>"),
            },
            "validate" => Event::ValidateRequested,
            "generate" | "g" => Event::GenerateRequested,
            "save" => Event::SaveRequested,
            "export" => match args.parse::<ExportFormat>() {
                Ok(format) => Event::ExportRequested(format),
                Err(_) => return Self::usage("export json|txt"),
            },
            "copy" => Event::CopyRequested,
            "search" | "s" | "/" => Event::SearchTextChanged(args.to_string()),
            "go" => Event::SearchSubmitted,
            "rating" | "min" => match args.parse::<u8>() {
                Ok(stars) => Event::RatingFilterClicked(stars),
                Err(_) => return Self::usage("rating <1-5>"),
            },
            "all" => Event::LoadAllRecipes,
            "next" | "n" | "j" => Event::SelectNext,
            "prev" | "p" | "k" => Event::SelectPrevious,
            "open" | "o" => {
                if args.is_empty() {
                    Event::OpenSelected
                } else {
                    match args.parse::<RecipeId>() {
                        Ok(id) => Event::OpenRecipe(id),
                        Err(_) => return Self::usage("open [id]"),
                    }
                }
            }
            "rate" => {
                let parts: Vec<&str> = args.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [stars] => open_recipe.zip(stars.parse::<u8>().ok()),
                    [id, stars] => id.parse::<RecipeId>().ok().zip(stars.parse::<u8>().ok()),
                    _ => None,
                };
                match parsed {
                    Some((id, stars)) => Event::RateRecipe { id, stars },
                    None => return Self::usage("rate [id] <1-5>"),
                }
            }
            "edit" => return Self::parse_edit(args, open_recipe),
            "delete" | "rm" => {
                let id = if args.is_empty() {
                    open_recipe
                } else {
                    args.parse::<RecipeId>().ok()
                };
                match id {
                    Some(id) => Event::DeleteRecipe(id),
                    None => return Self::usage("delete [id]"),
                }
            }
            "generator" | "gen" => Event::ShowGenerator,
            "library" | "lib" => Event::ShowLibrary,
            "back" => Event::Back,
            "about" => Event::ShowAbout,
            "close" => Event::CloseAbout,
            "help" | "h" | "?" => return Self::Help,
            "quit" | "q" | "exit" => return Self::Quit,
            _ => {
                return Self::Invalid(format!(
                    "Unknown command: {cmd}. Type help for available commands."
                ))
            }
        };
        Self::Event(event)
    }

    /// `edit [id] <field>=<value>`
    fn parse_edit(args: &str, open_recipe: Option<RecipeId>) -> Self {
        let (id, assignment) = match args.split_once(char::is_whitespace) {
            Some((first, rest)) if !first.contains('=') => {
                (first.parse::<RecipeId>().ok(), rest.trim())
            }
            _ => (open_recipe, args),
        };
        let (Some(id), Some((field, value))) = (id, assignment.split_once('=')) else {
            return Self::usage("edit [id] <field>=<value>");
        };

        let mut edit = RecipeEdit::default();
        match edit.set_field(field, value) {
            Ok(()) => Self::Event(Event::EditRecipe { id, edit }),
            Err(e) => Self::Invalid(e.to_string()),
        }
    }

    fn usage(text: &str) -> Self {
        Self::Invalid(format!("Usage: {text}"))
    }

    /// Get help text for all commands
    #[must_use]
    pub const fn help_text() -> &'static str {
        r"Generator:
  ingredients <list>     Set ingredients (validated as you go)
  diet <text>            Dietary restrictions
  cuisine <text>         Cuisine preference
  servings <1-12>        Serving size
  validate               Check the ingredients now
  generate               Generate a recipe
  save | copy            Save or copy the current recipe
  export json|txt        Download the current recipe

Library:
  library                Show saved recipes
  search <text>          Search titles and ingredients
  go                     Run the search now
  rating <1-5>           Toggle the minimum rating filter
  all                    Clear filters and load every recipe
  next | prev            Move the selection
  open [id]              Show a recipe
  back                   Return from a recipe to the list
  rate [id] <1-5>        Rate a recipe
  edit [id] <f>=<v>      Edit title, recipe, ingredients, diet, cuisine or servings
  delete [id]            Delete a recipe

Other:
  generator | about | close | help | quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredients_keeps_commas() {
        assert_eq!(
            Command::parse("ingredients eggs, flour,  milk", None),
            Command::Event(Event::IngredientsChanged("eggs, flour,  milk".to_string()))
        );
    }

    #[test]
    fn test_parse_bare_search_clears_query() {
        assert_eq!(
            Command::parse("search", None),
            Command::Event(Event::SearchTextChanged(String::new()))
        );
    }

    #[test]
    fn test_parse_rate_uses_open_recipe() {
        assert_eq!(
            Command::parse("rate 4", Some(7)),
            Command::Event(Event::RateRecipe { id: 7, stars: 4 })
        );
        assert_eq!(
            Command::parse("rate 3 5", Some(7)),
            Command::Event(Event::RateRecipe { id: 3, stars: 5 })
        );
        assert!(matches!(Command::parse("rate 4", None), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_edit() {
        let Command::Event(Event::EditRecipe { id, edit }) =
            Command::parse("edit title=Sunday Roast", Some(2))
        else {
            panic!("Expected edit");
        };
        assert_eq!(id, 2);
        assert_eq!(edit.title.as_deref(), Some("Sunday Roast"));

        let Command::Event(Event::EditRecipe { id, edit }) = Command::parse("edit 9 servings=6", None)
        else {
            panic!("Expected edit");
        };
        assert_eq!(id, 9);
        assert_eq!(edit.serving_size, Some(6));

        assert!(matches!(
            Command::parse("edit 9 colour=red", None),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!(
            Command::parse("export TXT", None),
            Command::Event(Event::ExportRequested(ExportFormat::Txt))
        );
        assert!(matches!(Command::parse("export pdf", None), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_back_is_not_library() {
        assert_eq!(Command::parse("back", None), Command::Event(Event::Back));
        assert_eq!(Command::parse("lib", None), Command::Event(Event::ShowLibrary));
    }

    #[test]
    fn test_parse_unknown() {
        match Command::parse("bake", None) {
            Command::Invalid(message) => assert!(message.contains("bake")),
            _ => panic!("Expected Invalid"),
        }
        assert_eq!(Command::parse("   ", None), Command::Empty);
    }
}
