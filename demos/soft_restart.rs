//! Soft Restart Demo - claim sweep and bootloader handoff (STM32F401)
//!
//! Walks the restart path of an embedding runtime: allocate driver
//! resources, sweep them at the soft-restart boundary, then hand the
//! part to the ROM bootloader for a firmware update.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use hwcore::busy_wait_us;
use hwcore::claim::timer;
use hwcore::types::RunMode;

#[entry]
fn main() -> ! {
    hwcore::init();

    // A driver set: one ordinary claim, one that must survive restarts
    let scratch = timer::allocate(0, 0, false).expect("scratch channel busy");
    let status = timer::allocate(2, 1, true).expect("status channel busy");
    hwcore::info!("claimed {}.{} and {}.{}",
        scratch.unit(), scratch.channel(), status.unit(), status.channel());

    // Soft-restart boundary: ordinary claims go away, persistent ones stay
    timer::sweep();
    hwcore::info!("scratch freed: {}", timer::is_free(scratch.unit(), scratch.channel()));
    hwcore::info!("status kept: {}", !timer::is_free(status.unit(), status.channel()));

    hwcore::request_reset_mode(RunMode::Bootloader);
    hwcore::info!("entering bootloader");
    // Give RTT a moment to drain before control leaves the firmware
    busy_wait_us(50_000);
    hwcore::execute_reset();
}
