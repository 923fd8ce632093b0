//! Command execution. Each command returns the text to print.

use std::sync::Arc;

use serde::Serialize;
use stowage_client::api::{ApiError, WarehouseApi};
use stowage_client::door::{load_door, save_door, DoorError};
use stowage_client::generate::{generate_layout, GenerateError};
use stowage_client::preview::PreviewSession;
use stowage_client::stock::{add_stock, StockError};
use stowage_core::error::CoreError;
use stowage_core::items::ItemList;
use stowage_core::layout::build_generate_request;
use stowage_core::locale::{MessageKey, PreferenceStore, Translator};
use stowage_core::stock::{expand_stock, require_dimensions, AutoPopulate};
use stowage_core::types::DbId;
use stowage_core::validation::{annotate_rows, ValidationResult};

use crate::args::{Command, DoorAction, GenerateArgs, LayoutAction, StockAction};

/// Failure of a single command, rendered for the user with
/// [`CliError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Local(#[from] CoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Door(#[from] DoorError),
    #[error(transparent)]
    Stock(#[from] StockError),
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    pub fn user_message(&self, translator: &Translator) -> String {
        match self {
            CliError::Local(e) => translator.translate(e.message_key()).to_string(),
            CliError::Api(e) => e.user_message(translator),
            CliError::Generate(e) => e.user_message(translator),
            CliError::Door(e) => e.user_message(translator),
            CliError::Stock(e) => e.user_message(translator),
            CliError::Render(_) => translator.translate(MessageKey::GenericError).to_string(),
        }
    }
}

/// Everything a command needs: the backend, the active translator and
/// the preference store it persists to.
pub struct App<S: PreferenceStore> {
    pub api: WarehouseApi,
    pub translator: Translator,
    pub prefs: S,
}

fn pretty<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

impl<S: PreferenceStore> App<S> {
    pub async fn run(&mut self, command: Command) -> Result<String, CliError> {
        match command {
            Command::Rooms => pretty(&self.api.list_rooms().await?),
            Command::Room { room_id } => pretty(&self.api.get_room(room_id).await?),
            Command::Stats { room_id } => pretty(&self.api.room_stats(room_id).await?),
            Command::StockPreview { room, caps } => {
                let (stock, dimensions) =
                    tokio::try_join!(self.api.room_stock(room), self.api.list_dimensions())?;
                let expansion = expand_stock(&stock, &dimensions, caps.caps(), caps.policy());
                pretty(&expansion)
            }
            Command::Validate { room, items } => {
                let dimensions = self.api.list_dimensions().await?;
                require_dimensions(items.iter().filter_map(|row| row.product_id), &dimensions)?;
                let request = annotate_rows(&items, &dimensions);
                let result = self.api.validate_layout(room, &request).await?;
                self.render_validation(&result)
            }
            Command::Generate(args) => self.generate(args).await,
            Command::Layout { action } => self.layout(action).await,
            Command::Visualize { room_id, view } => {
                pretty(&self.api.visualization(room_id, view.into()).await?)
            }
            Command::Door { action } => self.door(action).await,
            Command::Suggest {
                product_id,
                quantity,
            } => {
                if quantity <= 0 {
                    return Err(CoreError::NonPositiveQuantity(quantity).into());
                }
                pretty(&self.api.suggest_storage(product_id, quantity).await?)
            }
            Command::Stock {
                action:
                    StockAction::Add {
                        product,
                        quantity,
                        room,
                    },
            } => {
                let outcome = add_stock(&self.api, product, quantity, room).await?;
                Ok(outcome.messages(&self.translator).join("\n"))
            }
            Command::Lang { locale } => {
                match locale {
                    Some(locale) => self.translator.set_locale(locale.into(), &mut self.prefs)?,
                    None => {
                        self.translator.toggle(&mut self.prefs)?;
                    }
                }
                Ok(self
                    .translator
                    .translate(MessageKey::LanguageChanged)
                    .to_string())
            }
        }
    }

    async fn generate(&self, args: GenerateArgs) -> Result<String, CliError> {
        let room_id = args.room;
        let dimensions = self.api.list_dimensions().await?;

        let mut items = ItemList::new();
        let mut auto = AutoPopulate::new(args.caps.caps(), args.caps.policy());
        if !args.items.is_empty() || !args.from_stock {
            auto.disarm();
        }
        for row in &args.items {
            items.add_row(*row);
        }

        if auto.is_armed() {
            let stock = self.api.room_stock(room_id).await?;
            let product_count = stock.iter().filter(|s| s.product_id.is_some()).count();
            if let Some(expansion) = auto.run(product_count, &stock, &dimensions) {
                tracing::info!(
                    room_id,
                    products = expansion.preview.included_products,
                    total = expansion.preview.expanded_total,
                    "Items populated from stock"
                );
                items.replace_with(&expansion.included);
            }
        }

        let options = args.options();
        // Local failures surface before the capacity preview is requested.
        build_generate_request(items.rows(), &dimensions, &options)?;

        let session = PreviewSession::new(Arc::new(self.api.clone()));
        session.revalidate(room_id, items.rows(), &dimensions).await;
        let latest = session.latest();

        let layout = generate_layout(
            &self.api,
            room_id,
            items.rows(),
            &dimensions,
            &options,
            latest.as_ref(),
        )
        .await?;

        Ok(format!(
            "{}\n{}",
            self.translator.translate(MessageKey::LayoutGenerated),
            pretty(&layout)?
        ))
    }

    async fn layout(&self, action: LayoutAction) -> Result<String, CliError> {
        match action {
            LayoutAction::Show { room_id } => pretty(&self.api.get_layout(room_id).await?),
            LayoutAction::Optimize { room_id, tuning } => pretty(
                &self
                    .api
                    .optimize_layout(room_id, &tuning.layout_options())
                    .await?,
            ),
            LayoutAction::Refresh { room_id } => pretty(&self.api.refresh_layout(room_id).await?),
            LayoutAction::Clear { room_id } => {
                self.api.delete_layout(room_id).await?;
                Ok(String::new())
            }
        }
    }

    async fn door(&self, action: DoorAction) -> Result<String, CliError> {
        let form = action.form();
        match action {
            DoorAction::Show { room_id } => {
                let room = self.api.get_room(room_id).await?;
                pretty(&load_door(&self.api, room_id, Some(&room)).await?)
            }
            DoorAction::Set { room_id, .. } => {
                let form = form.unwrap_or_default();
                let api = &self.api;
                let saved = save_door(api, room_id, &form, |door| async move {
                    match api.get_room(room_id).await {
                        Ok(room) => tracing::debug!(room_id, name = %room.name, ?door, "Room refreshed"),
                        Err(e) => tracing::warn!(room_id, error = %e, "Room refresh after door save failed"),
                    }
                })
                .await?;
                Ok(format!(
                    "{}\n{}",
                    self.translator.translate(MessageKey::DoorSaved),
                    pretty(&saved)?
                ))
            }
        }
    }

    fn render_validation(&self, result: &ValidationResult) -> Result<String, CliError> {
        let key = if result.valid {
            MessageKey::CapacityOk
        } else {
            MessageKey::CapacityExceeded
        };
        let mut lines = vec![
            self.translator.translate(key).to_string(),
            format!(
                "{:.0}% ({}: {:.2} / {:.2})",
                result.capacity.estimated_utilization * 100.0,
                result.capacity.strategy,
                result.capacity.total_volume,
                result.capacity.room_volume,
            ),
        ];
        lines.extend(result.errors().map(|e| format!("! {e}")));
        lines.extend(result.warnings().iter().map(|w| format!("~ {w}")));
        for (product_id, suggestion) in &result.suggestions {
            lines.push(suggestion_line(
                *product_id,
                suggestion.suggested_quantity,
                suggestion.limited_by.as_deref(),
            ));
        }
        Ok(lines.join("\n"))
    }
}

fn suggestion_line(product_id: DbId, quantity: i64, limited_by: Option<&str>) -> String {
    match limited_by {
        Some(limit) => format!("#{product_id}: {quantity} ({limit})"),
        None => format!("#{product_id}: {quantity}"),
    }
}

#[cfg(test)]
mod tests {
    use stowage_core::locale::{Locale, MemoryStore};
    use stowage_core::validation::{CapacityEstimate, ProductSuggestion, RoomValidation};

    use super::*;
    use crate::args::LocaleArg;

    fn app() -> App<MemoryStore> {
        App {
            api: WarehouseApi::new("http://127.0.0.1:1"),
            translator: Translator::new(Locale::En),
            prefs: MemoryStore::new(),
        }
    }

    #[test]
    fn validation_rendering_lists_errors_warnings_and_suggestions() {
        let mut result = ValidationResult {
            valid: false,
            capacity: CapacityEstimate {
                estimated_utilization: 1.25,
                strategy: "volume".into(),
                room_volume: 100.0,
                total_volume: 125.0,
            },
            room_validation: RoomValidation {
                errors: vec!["Over capacity".into()],
                warnings: vec!["Tall items".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        result.suggestions.insert(
            3,
            ProductSuggestion {
                suggested_quantity: 4,
                limited_by: Some("height".into()),
            },
        );

        let text = app().render_validation(&result).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Items exceed the room capacity");
        assert_eq!(lines[1], "125% (volume: 125.00 / 100.00)");
        assert_eq!(lines[2], "! Over capacity");
        assert_eq!(lines[3], "~ Tall items");
        assert_eq!(lines[4], "#3: 4 (height)");
    }

    #[tokio::test]
    async fn lang_toggles_and_persists() {
        let mut app = app();
        let out = app.run(Command::Lang { locale: None }).await.unwrap();
        assert_eq!(app.translator.locale(), Locale::Ar);
        assert_eq!(
            out,
            Translator::new(Locale::Ar).translate(MessageKey::LanguageChanged)
        );
        assert_eq!(app.prefs.get("language").unwrap().as_deref(), Some("ar"));

        app.run(Command::Lang {
            locale: Some(LocaleArg::Ar),
        })
        .await
        .unwrap();
        assert_eq!(app.translator.locale(), Locale::Ar);
    }

    #[tokio::test]
    async fn suggest_rejects_non_positive_quantity_before_calling() {
        let mut app = app();
        let err = app
            .run(Command::Suggest {
                product_id: 1,
                quantity: 0,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(&app.translator),
            "Quantity must be greater than zero"
        );
    }
}
