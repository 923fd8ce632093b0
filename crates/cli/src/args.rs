//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use stowage_client::resources::visualization::VisualizationView;
use stowage_core::door::{DoorForm, Wall};
use stowage_core::items::ItemRow;
use stowage_core::layout::{Algorithm, GenerationOptions, GridOptions, LayoutOptions};
use stowage_core::locale::Locale;
use stowage_core::stock::{ExhaustionPolicy, InitCaps};
use stowage_core::types::DbId;

#[derive(Debug, Parser)]
#[command(name = "stowage", version, about = "Warehouse room layout client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List rooms.
    Rooms,
    /// Show one room.
    Room { room_id: DbId },
    /// Show utilization statistics for a room.
    Stats { room_id: DbId },
    /// Preview how a room's stock would expand into layout items.
    StockPreview {
        #[arg(long)]
        room: DbId,
        #[command(flatten)]
        caps: CapArgs,
    },
    /// Check whether items fit a room.
    Validate {
        #[arg(long)]
        room: DbId,
        /// Item as PRODUCT:QUANTITY; repeatable, duplicates allowed.
        #[arg(long = "item", value_parser = parse_item_row)]
        items: Vec<ItemRow>,
    },
    /// Generate a layout for a room.
    Generate(GenerateArgs),
    /// Show or manage the stored layout of a room.
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
    /// Fetch visualization data for a room.
    Visualize {
        room_id: DbId,
        #[arg(long, value_enum, default_value_t = ViewArg::Overview)]
        view: ViewArg,
    },
    /// Show or change a room's door.
    Door {
        #[command(subcommand)]
        action: DoorAction,
    },
    /// Ask where new stock of a product should go.
    Suggest {
        product_id: DbId,
        #[arg(long)]
        quantity: i64,
    },
    /// Add stock and optionally place it in a room.
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Set the language, or toggle it when no code is given.
    Lang {
        #[arg(value_enum)]
        locale: Option<LocaleArg>,
    },
}

#[derive(Debug, Args, Default)]
pub struct CapArgs {
    /// Maximum units per product when expanding stock.
    #[arg(long)]
    pub per_product_cap: Option<u32>,
    /// Maximum units in total when expanding stock.
    #[arg(long)]
    pub max_total: Option<u32>,
    /// List stock skipped once the total budget runs out.
    #[arg(long)]
    pub record_skipped: bool,
}

impl CapArgs {
    pub fn caps(&self) -> InitCaps {
        InitCaps {
            per_product_cap: self.per_product_cap,
            max_total_items: self.max_total,
        }
    }

    pub fn policy(&self) -> ExhaustionPolicy {
        if self.record_skipped {
            ExhaustionPolicy::RecordSkipped
        } else {
            ExhaustionPolicy::Stop
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long)]
    pub room: DbId,
    /// Item as PRODUCT:QUANTITY; repeatable. Disables stock auto-population.
    #[arg(long = "item", value_parser = parse_item_row)]
    pub items: Vec<ItemRow>,
    /// Populate items from the room's stock when no items are given.
    #[arg(long)]
    pub from_stock: bool,
    #[command(flatten)]
    pub caps: CapArgs,
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Compartment)]
    pub algorithm: AlgorithmArg,
    #[command(flatten)]
    pub tuning: TuningArgs,
}

impl GenerateArgs {
    pub fn options(&self) -> GenerationOptions {
        self.tuning.generation_options(self.algorithm.into())
    }
}

/// Layout tuning shared by `generate` and `layout optimize`. Omitted flags
/// are left out of the request.
#[derive(Debug, Args, Default)]
pub struct TuningArgs {
    #[arg(long)]
    pub max_layers: Option<u32>,
    #[arg(long)]
    pub prefer_bottom: Option<bool>,
    #[arg(long)]
    pub minimize_height: Option<bool>,
    #[arg(long)]
    pub columns: Option<u32>,
    #[arg(long)]
    pub rows: Option<u32>,
    #[arg(long)]
    pub column_max_height: Option<f64>,
}

impl TuningArgs {
    pub fn generation_options(&self, algorithm: Algorithm) -> GenerationOptions {
        GenerationOptions {
            algorithm,
            max_layers: self.max_layers,
            prefer_bottom: self.prefer_bottom,
            minimize_height: self.minimize_height,
            grid: GridOptions {
                columns: self.columns,
                rows: self.rows,
            },
            column_max_height: self.column_max_height,
        }
    }

    /// Body for the optimize endpoint, which takes no algorithm.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::from(&self.generation_options(Algorithm::default()))
    }
}

#[derive(Debug, Subcommand)]
pub enum LayoutAction {
    Show {
        room_id: DbId,
    },
    Optimize {
        room_id: DbId,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    Refresh {
        room_id: DbId,
    },
    Clear {
        room_id: DbId,
    },
}

#[derive(Debug, Subcommand)]
pub enum DoorAction {
    Show {
        room_id: DbId,
    },
    /// Omitted fields are cleared on the server.
    Set {
        room_id: DbId,
        #[arg(long, default_value = "")]
        x: String,
        #[arg(long, default_value = "")]
        y: String,
        #[arg(long, default_value = "")]
        width: String,
        #[arg(long, default_value = "")]
        height: String,
        #[arg(long, value_enum)]
        wall: Option<WallArg>,
    },
}

impl DoorAction {
    pub fn form(&self) -> Option<DoorForm> {
        match self {
            DoorAction::Show { .. } => None,
            DoorAction::Set {
                x,
                y,
                width,
                height,
                wall,
                ..
            } => Some(DoorForm {
                x: x.clone(),
                y: y.clone(),
                width: width.clone(),
                height: height.clone(),
                wall: wall.map(Wall::from),
            }),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum StockAction {
    Add {
        #[arg(long)]
        product: Option<DbId>,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        room: Option<DbId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Compartment,
    CompartmentGrid,
    LaffMaxrects,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Compartment => Algorithm::Compartment,
            AlgorithmArg::CompartmentGrid => Algorithm::CompartmentGrid,
            AlgorithmArg::LaffMaxrects => Algorithm::LaffMaxrects,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Overview,
    Grid,
    #[value(name = "3d")]
    ThreeD,
}

impl From<ViewArg> for VisualizationView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Overview => VisualizationView::Overview,
            ViewArg::Grid => VisualizationView::Grid,
            ViewArg::ThreeD => VisualizationView::ThreeD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WallArg {
    North,
    South,
    East,
    West,
}

impl From<WallArg> for Wall {
    fn from(arg: WallArg) -> Self {
        match arg {
            WallArg::North => Wall::North,
            WallArg::South => Wall::South,
            WallArg::East => Wall::East,
            WallArg::West => Wall::West,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    En,
    Ar,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Ar => Locale::Ar,
        }
    }
}

/// Parse `PRODUCT:QUANTITY`. Non-positive quantities are accepted here and
/// filtered by the request builder, like an unfinished form row.
pub fn parse_item_row(raw: &str) -> Result<ItemRow, String> {
    let (product, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT:QUANTITY, got '{raw}'"))?;
    let product_id: DbId = product
        .trim()
        .parse()
        .map_err(|_| format!("invalid product id '{product}'"))?;
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{quantity}'"))?;
    Ok(ItemRow::new(product_id, quantity))
}
