// [tests/mirror/libs/core/device/device_profile.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE LA SONDA DE SILICIO (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-DEVICE
 * RESPONSABILIDAD: COHERENCIA DEL PERFIL Y HEURÍSTICAS DE OCUPACIÓN
 * =================================================================
 */

use arbol_core_device::occupancy::{
    desired_occupancy_for, target_occupancy_cuda, target_occupancy_opencl_cpu,
    target_occupancy_openmp,
};
use arbol_core_device::profile::{host_profile, DeviceBackend, DeviceClass, DeviceProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_sonda_del_anfitrion_es_coherente() {
        println!("🔬 [PROBE]: Sondeando capacidades del anfitrión...");
        let profile = DeviceProfile::probe_host();

        assert_eq!(profile.class, DeviceClass::Cpu);
        assert_eq!(profile.backend, DeviceBackend::OpenMp);
        assert!(profile.max_compute_units >= 1);
        assert!(profile.max_work_group_size >= 1);
        assert!(profile.global_mem_size > 0);
        assert!(profile.max_mem_alloc_size <= profile.global_mem_size);

        println!("      🧮 [REPORT]:\n{profile}");
    }

    #[test]
    fn el_perfil_perezoso_es_estable_entre_accesos() {
        let first_access = host_profile();
        let second_access = host_profile();
        assert_eq!(first_access.max_compute_units, second_access.max_compute_units);
        assert_eq!(first_access.global_mem_size, second_access.global_mem_size);
    }

    #[test]
    fn el_perfil_sintetico_gpu_expone_la_rama_acelerada() {
        let profile = DeviceProfile::synthetic_gpu(1024, &[16, 32]);
        assert_eq!(profile.class, DeviceClass::Gpu);
        assert_eq!(profile.backend, DeviceBackend::Cuda);
        assert_eq!(profile.max_work_group_size, 1024);
        assert_eq!(profile.sub_group_sizes, vec![16, 32]);
    }

    #[test]
    fn las_heuristicas_de_ocupacion_respetan_sus_anclas_empiricas() {
        // Anclas del barrido empírico de sintonización.
        assert_eq!(target_occupancy_opencl_cpu(128), 6400);
        assert_eq!(target_occupancy_cuda(2560), 204_800);
        assert_eq!(target_occupancy_openmp(64), 2 * target_occupancy_opencl_cpu(64));

        // La curva CPU decrece monótonamente con el paralelismo.
        assert!(target_occupancy_opencl_cpu(8) > target_occupancy_opencl_cpu(16));
        assert!(target_occupancy_opencl_cpu(16) > target_occupancy_opencl_cpu(64));
    }

    #[test]
    fn el_despacho_por_backend_selecciona_la_curva_correcta() {
        assert_eq!(
            desired_occupancy_for(DeviceBackend::Cuda, 64),
            target_occupancy_cuda(64)
        );
        assert_eq!(
            desired_occupancy_for(DeviceBackend::Hip, 64),
            target_occupancy_cuda(64)
        );
        assert_eq!(
            desired_occupancy_for(DeviceBackend::OpenCl, 64),
            target_occupancy_opencl_cpu(64)
        );
        assert_eq!(
            desired_occupancy_for(DeviceBackend::OpenMp, 64),
            target_occupancy_openmp(64)
        );
    }
}
