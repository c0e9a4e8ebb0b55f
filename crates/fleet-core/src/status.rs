//! Shipment status vocabulary and the status → display colour table.

use serde::{Deserialize, Serialize};

/// Status value marking a finished shipment cycle.
pub const COMPLETED_STATUS: &str = "Selesai";

/// Display tone of a shipment status on the driver status card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// Still on the road, loading or unloading.
    InTransit,
    /// Reached the port or depot.
    Arrived,
    Completed,
    /// Cycle abandoned ("Tidak Lanjut").
    Discontinued,
    /// Status not present in the table.
    Unknown,
}

impl StatusTone {
    /// Resolve the tone of a title-cased status. Unknown statuses map to
    /// [`StatusTone::Unknown`].
    pub fn for_status(status: &str) -> Self {
        match status {
            "Tiba Di Depo Kosongan"
            | "Muat Kosongan"
            | "Menuju Gudang / Pabrik"
            | "Sampai Tujuan Pabrik / Gudang"
            | "Muat Barang"
            | "Keluar Pabrik / Menuju Pelabuhan"
            | "Menunggu Kartu Ekspor"
            | "Masuk Pelabuhan"
            | "Muat Container"
            | "Sampai Gudang / Pabrik"
            | "Bongkar Barang"
            | "Keluar Gudang / Pabrik" => StatusTone::InTransit,
            "Tiba Di Pelabuhan" | "Tiba Di Depo" => StatusTone::Arrived,
            COMPLETED_STATUS => StatusTone::Completed,
            "Tidak Lanjut" => StatusTone::Discontinued,
            _ => StatusTone::Unknown,
        }
    }

    /// Hex colour used to paint the status text.
    pub fn hex(self) -> &'static str {
        match self {
            StatusTone::InTransit => "#D94F4F",
            StatusTone::Arrived => "#FFD700",
            StatusTone::Completed => "#88B04B",
            StatusTone::Discontinued => "#A020F0",
            StatusTone::Unknown => "#FFFFFF",
        }
    }
}

/// Chart colour for a `Status Color` tag (`Green`, `Yellow`, `Red`).
pub fn tag_color(tag: &str) -> Option<&'static str> {
    match tag {
        "Green" => Some("#88B04B"),
        "Yellow" => Some("#FFD700"),
        "Red" => Some("#D94F4F"),
        _ => None,
    }
}
