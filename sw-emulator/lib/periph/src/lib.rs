/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Security Engine Emulator Peripheral library.

--*/

mod dma;
mod hash_sha;
mod hw_mutex;
mod pka;
mod root_bus;

pub use dma::DmaMemory;
pub use hash_sha::HashSha;
pub use hw_mutex::HwMutex;
pub use pka::Pka;
pub use root_bus::{SeBus, SeEmulator};
