//! Built-in pin map for the Jetson Orin Nano/NX 40-pin header (Tegra234)
//!
//! Pad names follow the NVIDIA pinmux spreadsheet; pad control register
//! addresses are PADCTL_A0 base 0x0243_0000 plus the TRM offset (the
//! device tree node is `pinmux@2430000`). The register addresses cannot
//! be discovered from the running system, so they are carried here.

use once_cell::sync::Lazy;

use super::{PlatformTable, PlatformTableBuilder};

/// Platform id of the built-in Jetson Orin table
pub const JETSON_ORIN: &str = "jetson-orin";

/// The table is validated exactly once, on first use.
static TABLE: Lazy<PlatformTable> = Lazy::new(build);

/// Built-in Jetson Orin Nano/NX header table.
///
/// Covers every muxable pin on the 40-pin header. Power and ground
/// positions are deliberately absent; resolving them reports a
/// configuration error rather than a kernel lookup miss.
pub(super) fn table() -> PlatformTable {
    TABLE.clone()
}

fn build() -> PlatformTable {
    PlatformTableBuilder::new(
        JETSON_ORIN,
        "NVIDIA Jetson Orin Nano/NX 40-pin expansion header (Tegra234)",
    )
    // I2C
    .pin_at(3, "gen2_i2c_sda_pdd0", &["i2c2"], 0x0243_01BC)
    .pin_at(5, "gen2_i2c_scl_pcc7", &["i2c2"], 0x0243_01B8)
    .pin_at(27, "gen1_i2c_sda_pi4", &["i2c1"], 0x0243_006C)
    .pin_at(28, "gen1_i2c_scl_pi3", &["i2c1"], 0x0243_0068)
    // UART
    .pin_at(8, "uart1_tx_pr2", &["uarta"], 0x0243_00C8)
    .pin_at(10, "uart1_rx_pr3", &["uarta"], 0x0243_00CC)
    .pin_at(11, "uart1_rts_pr4", &["uarta"], 0x0243_00D0)
    .pin_at(36, "uart1_cts_pr5", &["uarta"], 0x0243_00D4)
    // SPI1
    .pin_at(19, "spi1_mosi_pz5", &["spi1"], 0x0243_01E0)
    .pin_at(21, "spi1_miso_pz4", &["spi1"], 0x0243_01DC)
    .pin_at(23, "spi1_sck_pz3", &["spi1"], 0x0243_01D8)
    .pin_at(24, "spi1_cs0_pz6", &["spi1"], 0x0243_01E4)
    .pin_at(26, "spi1_cs1_pz7", &["spi1"], 0x0243_01E8)
    // SPI3
    .pin_at(13, "spi3_sck_py0", &["spi3"], 0x0243_00F8)
    .pin_at(16, "spi3_cs1_py4", &["spi3"], 0x0243_0108)
    .pin_at(18, "spi3_cs0_py3", &["spi3"], 0x0243_0104)
    .pin_at(22, "spi3_miso_py1", &["spi3"], 0x0243_00FC)
    .pin_at(37, "spi3_mosi_py2", &["spi3"], 0x0243_0100)
    // General-purpose pads
    .pin_at(7, "soc_gpio59_pac6", &["aud"], 0x0243_0070)
    .pin_at(12, "soc_gpio41_ph7", &["i2s2"], 0x0243_0058)
    .pin_at(15, "soc_gpio39_pn1", &["pwm1"], 0x0243_0050)
    .pin_at(29, "soc_gpio32_pq5", &["extperiph3"], 0x0243_0090)
    .pin_at(31, "soc_gpio33_pq6", &["extperiph4"], 0x0243_0094)
    .pin_at(32, "soc_gpio19_pg6", &["pwm5"], 0x0243_00E8)
    .pin_at(33, "soc_gpio21_ph0", &["pwm8"], 0x0243_00F0)
    .pin_at(35, "soc_gpio44_pi2", &["i2s2"], 0x0243_0064)
    .pin_at(38, "soc_gpio43_pi1", &["i2s2"], 0x0243_0060)
    .pin_at(40, "soc_gpio42_pi0", &["i2s2"], 0x0243_005C)
    .build()
    .expect("built-in Orin table must satisfy the uniqueness invariants")
}
