// [libs/core/device/src/occupancy.rs]
/*!
 * =================================================================
 * APARATO: OCCUPANCY HEURISTICS (V3.2 - EMPIRICAMENTE SINTONIZADO)
 * CLASIFICACIÓN: CORE DEVICE (ESTRATO L1)
 * RESPONSABILIDAD: WORK-GROUPS OBJETIVO POR UNIDAD DE CÓMPUTO
 *
 * # Logic:
 * Las constantes provienen de barridos empíricos sobre GPU de clase
 * Tesla P4 / GTX 1660 Super y CPUs OpenCL/OpenMP de 16 a 128 hilos.
 * La ocupación deseada crece al decrecer el paralelismo de hardware
 * en CPU (curva (128/threads)^(4/3)) y es plana en CUDA/HIP.
 * =================================================================
 */

use crate::profile::DeviceBackend;

/// Ocupación objetivo para dispositivos CPU gobernados por OpenCL.
pub fn target_occupancy_opencl_cpu(threads: usize) -> usize {
    let threads = threads.max(1) as f64;
    (6400.0 * (128.0 / threads).powf(4.0 / 3.0)) as usize
}

/// Ocupación objetivo para el backend OpenMP: el doble de la curva CPU.
pub fn target_occupancy_openmp(threads: usize) -> usize {
    2 * target_occupancy_opencl_cpu(threads)
}

/// Ocupación objetivo plana para CUDA/HIP.
pub fn target_occupancy_cuda(_threads: usize) -> usize {
    204_800
}

/// Despacho de la heurística según el backend del perfil.
pub fn desired_occupancy_for(backend: DeviceBackend, threads: usize) -> usize {
    match backend {
        DeviceBackend::Cuda | DeviceBackend::Hip => target_occupancy_cuda(threads),
        DeviceBackend::OpenCl | DeviceBackend::LevelZero => target_occupancy_opencl_cpu(threads),
        DeviceBackend::OpenMp => target_occupancy_openmp(threads),
    }
}
