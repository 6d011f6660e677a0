// [libs/domain/simulation/src/queue/mod.rs]
/*!
 * =================================================================
 * APARATO: EXECUTION QUEUE HUB (V7.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN SCHEDULING (ESTRATO L2)
 * RESPONSABILIDAD: COLA DE DISPOSITIVO Y UNIDADES ENCOLABLES
 * =================================================================
 */

pub mod builder;
pub mod manager;
pub mod queueable;

use arbol_core_device::profile::DeviceProfile;
use tracing::debug;

use crate::errors::SimulationError;

/// Cola de mando del dispositivo: el pool de hilos que ejecuta los
/// rangos ND de los kernels.
#[derive(Debug)]
pub struct DeviceQueue {
    pool: rayon::ThreadPool,
}

impl DeviceQueue {
    /// Construye la cola dimensionada a las unidades de cómputo del
    /// perfil del dispositivo.
    pub fn for_profile(profile: &DeviceProfile) -> Result<Self, SimulationError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(profile.max_compute_units)
            .thread_name(|worker| format!("arbol-device-{worker}"))
            .build()?;

        debug!(
            "🧵 [DEVICE_QUEUE]: pool online with {} compute units",
            profile.max_compute_units
        );
        Ok(Self { pool })
    }

    /// Ejecuta la operación dentro del pool del dispositivo.
    #[inline]
    pub fn install<R: Send>(&self, operation: impl FnOnce() -> R + Send) -> R {
        self.pool.install(operation)
    }
}
