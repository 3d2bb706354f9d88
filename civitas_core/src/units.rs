/// Chain amounts arrive as integer base units; the domain stores decimal
/// units scaled by the configured number of decimals.
pub fn to_decimal(raw: u128, decimals: u32) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}
