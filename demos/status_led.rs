//! Status LED Demo - heartbeat on the Nucleo user LED (STM32F401)
//!
//! Claims its pin and timer channel persistently, the way a status
//! indicator driver would: a soft restart of the embedding runtime must
//! not take the heartbeat away.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use hwcore::busy_wait_us;
use hwcore::claim::timer;

#[cfg(feature = "pac")]
use stm32_metapac as pac;

/// Nucleo-F401 user LED on PA5
const LED_PIN: u8 = 5;

// ============ LED Control ============

#[cfg(feature = "pac")]
fn led_init() {
    pac::RCC.ahb1enr().modify(|w| w.set_gpioaen(true));
    pac::GPIOA.moder().modify(|w| w.set_moder(5, pac::gpio::vals::Moder::OUTPUT));
    pac::GPIOA.otyper().modify(|w| w.set_ot(5, pac::gpio::vals::Ot::PUSHPULL));
}

#[cfg(feature = "pac")]
fn led_on() { pac::GPIOA.bsrr().write(|w| w.set_bs(5, true)); }

#[cfg(feature = "pac")]
fn led_off() { pac::GPIOA.bsrr().write(|w| w.set_br(5, true)); }

#[cfg(not(feature = "pac"))]
fn led_init() {}
#[cfg(not(feature = "pac"))]
fn led_on() {}
#[cfg(not(feature = "pac"))]
fn led_off() {}

// ============ Main ============

#[entry]
fn main() -> ! {
    hwcore::init();
    led_init();

    #[cfg(feature = "pins")]
    hwcore::claim::pin::claim(LED_PIN, true).expect("LED pin already claimed");

    let heartbeat = timer::allocate(0, 0, true).expect("heartbeat channel busy");
    hwcore::info!("heartbeat on timer {}.{}", heartbeat.unit(), heartbeat.channel());

    loop {
        led_on();
        busy_wait_us(100_000);
        led_off();
        busy_wait_us(900_000);
    }
}
