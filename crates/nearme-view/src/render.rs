//! Pure presentation of a [`ViewState`].

use std::fmt;

use crate::state::ViewState;

/// One rendered place; `key` is the provider's venue id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceItem {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Failure(String),
    Resolving,
    Location { latitude: String, longitude: String },
    Weather { description: String, temperature: String },
    Places { title: String, items: Vec<PlaceItem> },
}

/// What the user sees for a given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub blocks: Vec<Block>,
}

/// Render `state`. A failure replaces everything else.
pub fn render(state: &ViewState) -> View {
    if let Some(message) = &state.failure {
        return View {
            blocks: vec![Block::Failure(message.clone())],
        };
    }

    let mut blocks = Vec::new();

    blocks.push(match state.coordinate {
        Some(coordinate) => Block::Location {
            latitude: coordinate.latitude().to_string(),
            longitude: coordinate.longitude().to_string(),
        },
        None => Block::Resolving,
    });

    if let Some(weather) = &state.weather {
        blocks.push(Block::Weather {
            description: weather.description.clone(),
            temperature: weather.display_temperature(),
        });
    }

    if let Some(places) = state.places.as_ref().filter(|p| !p.is_empty()) {
        blocks.push(Block::Places {
            title: format!("Nearby {} places:", state.query),
            items: places
                .iter()
                .map(|p| PlaceItem {
                    key: p.id.clone(),
                    name: p.name.clone(),
                })
                .collect(),
        });
    }

    View { blocks }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Failure(message) => write!(f, "{}", message),
            Block::Resolving => write!(f, "Getting your location..."),
            Block::Location {
                latitude,
                longitude,
            } => {
                writeln!(f, "Latitude: {}", latitude)?;
                write!(f, "Longitude: {}", longitude)
            }
            Block::Weather {
                description,
                temperature,
            } => {
                writeln!(f, "Weather: {}", description)?;
                write!(f, "Temperature: {}°C", temperature)
            }
            Block::Places { title, items } => {
                write!(f, "{}", title)?;
                for item in items {
                    write!(f, "\n- {}", item.name)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
