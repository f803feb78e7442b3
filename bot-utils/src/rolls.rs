/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

use crate::StopListener;
use parking_lot::Mutex;
use rand::{rngs::OsRng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};

/// Hands out an independent generator per command invocation.
///
/// The generators are seeded from a cryptographic master generator which
/// itself is reseeded from the operating system by [`reseed_periodically`].
pub struct RngProvider {
    master: Mutex<ChaCha20Rng>,
}

impl RngProvider {
    pub fn new() -> Result<RngProvider, rand::Error> {
        Ok(RngProvider {
            master: Mutex::new(ChaCha20Rng::from_rng(OsRng)?),
        })
    }

    /// Deterministic provider, only meant for tests and simulations.
    pub fn from_seed(seed: u64) -> RngProvider {
        RngProvider {
            master: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    pub fn get_rng(&self) -> Result<Xoshiro256PlusPlus, rand::Error> {
        let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
        self.master.lock().try_fill(&mut seed)?;
        Ok(Xoshiro256PlusPlus::from_seed(seed))
    }

    pub fn reseed(&self) -> Result<(), rand::Error> {
        let fresh = ChaCha20Rng::from_rng(OsRng)?;
        *self.master.lock() = fresh;
        Ok(())
    }
}

pub async fn reseed_periodically<S: StopListener>(
    rng: Arc<RngProvider>,
    period: Duration,
    mut stop: S,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match rng.reseed() {
                    Ok(_) => log::debug!("reseeded rng"),
                    Err(e) => log::error!("unable to reseed rng: {}", e),
                }
            }
            _ = stop.wait_stop() => {
                break;
            }
        }
    }
    log::info!("stopped reseeding task");
}
