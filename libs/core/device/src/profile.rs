// [libs/core/device/src/profile.rs]
/*!
 * =================================================================
 * APARATO: SILICON CAPABILITY PROBE (V7.4 - SOBERANO)
 * CLASIFICACIÓN: CORE DEVICE (ESTRATO L1)
 * RESPONSABILIDAD: TELEMETRÍA DE CAPACIDADES CON ADAPTACIÓN VIRTUAL
 *
 * # Logic:
 * En infraestructuras efímeras (contenedores, hipervisores) los
 * descriptores de hardware suelen estar capados. Este aparato:
 * 1. Intenta lectura directa de /proc (meminfo, cpuinfo).
 * 2. Si falla, aplica valores sintéticos conservadores para que el
 *    planificador siempre disponga de un perfil coherente.
 * =================================================================
 */

use std::fmt;
use std::fs;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::range::Range3;

/// Clase del dispositivo de cómputo, en la taxonomía del runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Cpu,
    Gpu,
    Accelerator,
    Host,
}

/// Backend que gobierna el dispositivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceBackend {
    Cuda,
    Hip,
    OpenCl,
    LevelZero,
    OpenMp,
}

/// Capacidades crudas del dispositivo consumidas por el planificador.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub backend: DeviceBackend,
    /// Unidades de cómputo disponibles (núcleos físicos en CPU).
    pub max_compute_units: usize,
    /// Frecuencia máxima reportada, en MHz (0 si es desconocida).
    pub max_clock_frequency_megahertz: u32,
    /// Límite de work-items por eje en rangos 3D.
    pub max_work_item_sizes: Range3,
    /// Límite del producto de la forma local.
    pub max_work_group_size: usize,
    /// Tamaños de sub-grupo reportados (vacío en CPU).
    pub sub_group_sizes: Vec<usize>,
    /// Máxima reserva individual de memoria del dispositivo, en bytes.
    pub max_mem_alloc_size: u64,
    /// Memoria global total, en bytes.
    pub global_mem_size: u64,
    /// Memoria local por work-group, en bytes.
    pub local_mem_size: u64,
}

/// Memoria global sintética cuando /proc/meminfo está capado: 8 GiB.
const SYNTHETIC_GLOBAL_MEMORY_BYTES: u64 = 8 * 1024 * 1024 * 1024;

/// Límite local clásico de los runtimes CPU.
const CPU_MAX_WORK_GROUP_SIZE: usize = 1024;

impl DeviceProfile {
    /// Sonda del anfitrión: la CPU gobernada por el pool de hilos.
    pub fn probe_host() -> Self {
        let compute_units = num_cpus::get_physical().max(1);
        let global_memory = read_global_memory_bytes().unwrap_or(SYNTHETIC_GLOBAL_MEMORY_BYTES);
        let clock_megahertz = read_clock_frequency_megahertz().unwrap_or(0);

        let profile = Self {
            class: DeviceClass::Cpu,
            backend: DeviceBackend::OpenMp,
            max_compute_units: compute_units,
            max_clock_frequency_megahertz: clock_megahertz,
            max_work_item_sizes: Range3::new(
                CPU_MAX_WORK_GROUP_SIZE,
                CPU_MAX_WORK_GROUP_SIZE,
                CPU_MAX_WORK_GROUP_SIZE,
            ),
            max_work_group_size: CPU_MAX_WORK_GROUP_SIZE,
            sub_group_sizes: Vec::new(),
            // Convención OpenCL: una reserva individual no excede 1/4
            // de la memoria global.
            max_mem_alloc_size: global_memory / 4,
            global_mem_size: global_memory,
            local_mem_size: 64 * 1024,
        };

        debug!("🔬 [SILICON_PROBE]: Host profile acquired. units={}, clock={}MHz", profile.max_compute_units, profile.max_clock_frequency_megahertz);
        profile
    }

    /// Perfil GPU sintético para auditar la rama acelerada del
    /// planificador sin hardware presente.
    pub fn synthetic_gpu(max_work_group_size: usize, sub_group_sizes: &[usize]) -> Self {
        Self {
            class: DeviceClass::Gpu,
            backend: DeviceBackend::Cuda,
            max_compute_units: 2560,
            max_clock_frequency_megahertz: 1531,
            max_work_item_sizes: Range3::new(1024, 1024, 64),
            max_work_group_size,
            sub_group_sizes: sub_group_sizes.to_vec(),
            max_mem_alloc_size: 2 * 1024 * 1024 * 1024,
            global_mem_size: 8 * 1024 * 1024 * 1024,
            local_mem_size: 48 * 1024,
        }
    }
}

/// Lee MemTotal de /proc/meminfo, en bytes.
fn read_global_memory_bytes() -> Option<u64> {
    let contents = fs::read_to_string("/proc/meminfo").ok()?;
    let line = contents.lines().find(|line| line.starts_with("MemTotal:"))?;
    let kilobytes: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kilobytes * 1024)
}

/// Lee la primera entrada "cpu MHz" de /proc/cpuinfo.
fn read_clock_frequency_megahertz() -> Option<u32> {
    let contents = fs::read_to_string("/proc/cpuinfo").ok()?;
    let line = contents.lines().find(|line| line.starts_with("cpu MHz"))?;
    let megahertz: f64 = line.split(':').nth(1)?.trim().parse().ok()?;
    Some(megahertz as u32)
}

/// Perfil del anfitrión, sondeado una única vez por proceso.
static HOST_PROFILE: Lazy<DeviceProfile> = Lazy::new(DeviceProfile::probe_host);

/// Acceso al perfil perezoso del anfitrión.
pub fn host_profile() -> &'static DeviceProfile {
    &HOST_PROFILE
}

impl fmt::Display for DeviceProfile {
    /// Reporte legible de capacidades, emitido en la construcción del
    /// pipeline a nivel DEBUG.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "device_class: {:?}", self.class)?;
        writeln!(formatter, "backend: {:?}", self.backend)?;
        writeln!(formatter, "max_compute_units: {}", self.max_compute_units)?;
        writeln!(formatter, "max_clock_frequency: {} MHz", self.max_clock_frequency_megahertz)?;
        writeln!(formatter, "------------------------------------------------")?;
        writeln!(
            formatter,
            "max_work_item_sizes_3d: {}, {}, {}",
            self.max_work_item_sizes.events, self.max_work_item_sizes.batch, self.max_work_item_sizes.bitpacks
        )?;
        writeln!(formatter, "max_work_group_size: {}", self.max_work_group_size)?;
        writeln!(formatter, "sub_group_sizes: {:?}", self.sub_group_sizes)?;
        writeln!(formatter, "------------------------------------------------")?;
        writeln!(formatter, "max_mem_alloc_size: {}", self.max_mem_alloc_size)?;
        writeln!(formatter, "global_mem_size: {}", self.global_mem_size)?;
        write!(formatter, "local_mem_size: {}", self.local_mem_size)
    }
}
