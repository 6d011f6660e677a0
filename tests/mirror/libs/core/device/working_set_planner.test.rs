// [tests/mirror/libs/core/device/working_set_planner.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL PLANIFICADOR WORKING-SET (V7.2)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-DEVICE
 * RESPONSABILIDAD: PRESUPUESTO log2, FAST-PATH CPU Y ACOLCHADO ND
 *
 * # Mathematical Proof (Bit Budget):
 * El producto de la forma local es 2^(suma de bits gastados), y la
 * suma jamás excede log2(max_work_group_size); por tanto el producto
 * local respeta el límite del dispositivo en toda negociación.
 * =================================================================
 */

use arbol_core_device::profile::DeviceProfile;
use arbol_core_device::range::Range3;
use arbol_core_device::working_set::{closest_power_of_2, WorkingSet};
use arbol_core_sampling::shape::SampleShape;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_presupuesto_prioriza_el_eje_de_eventos() {
        println!("🔬 [PLANNER]: Presupuesto log2 con eventos dominantes...");
        let profile = DeviceProfile::synthetic_gpu(1024, &[32]);
        let shape = SampleShape::new(4096, 4096).unwrap();
        let planner = WorkingSet::<u64>::new(&profile, 4096, shape);

        let local = planner.local_range(Range3::unbounded());
        // 10 bits de presupuesto, todos consumidos por el eje X.
        assert_eq!(local, Range3::new(1024, 1, 1));
    }

    #[test]
    fn el_presupuesto_residual_fluye_hacia_batch_y_bitpacks() {
        let profile = DeviceProfile::synthetic_gpu(1024, &[32]);
        let shape = SampleShape::new(8, 4096).unwrap();
        let planner = WorkingSet::<u64>::new(&profile, 2, shape);

        let local = planner.local_range(Range3::unbounded());
        // X gasta 1 bit (2 eventos), Y gasta 3 (batch 8), Z recibe el
        // resto acotado por el límite de hardware del eje (64).
        assert_eq!(local, Range3::new(2, 8, 64));
        assert!(local.product() <= 1024);
    }

    #[test]
    fn el_fast_path_cpu_cubre_un_word_de_64_bits() {
        let profile = DeviceProfile::probe_host();
        let shape = SampleShape::new(16, 256).unwrap();

        let planner_u8 = WorkingSet::<u8>::new(&profile, 32, shape);
        assert_eq!(planner_u8.local_range(Range3::unbounded()), Range3::new(1, 1, 8));

        let planner_u64 = WorkingSet::<u64>::new(&profile, 32, shape);
        assert_eq!(planner_u64.local_range(Range3::unbounded()), Range3::new(1, 1, 1));
    }

    #[test]
    fn el_tally_fuerza_un_grupo_por_evento() {
        let profile = DeviceProfile::synthetic_gpu(1024, &[32]);
        let shape = SampleShape::new(64, 1024).unwrap();
        let planner = WorkingSet::<u64>::new(&profile, 16, shape);

        let local = planner.local_range_for_tally();
        println!("      📐 [TALLY]: local=({}, {}, {})", local.events, local.batch, local.bitpacks);
        assert_eq!(local.events, 1);
        assert!(local.product() <= 1024);
    }

    #[test]
    fn el_nd_range_acolcha_a_multiplos_del_local() {
        let profile = DeviceProfile::synthetic_gpu(256, &[]);
        let shape = SampleShape::new(5, 100).unwrap();
        let planner = WorkingSet::<u64>::new(&profile, 3, shape);

        let local = planner.local_range(Range3::unbounded());
        let nd_range = planner.nd_range(local);

        assert_eq!(nd_range.global.events % nd_range.local.events, 0);
        assert_eq!(nd_range.global.batch % nd_range.local.batch, 0);
        assert_eq!(nd_range.global.bitpacks % nd_range.local.bitpacks, 0);
        assert!(nd_range.global.events >= 3);
        assert!(nd_range.global.batch >= 5);
        assert!(nd_range.global.bitpacks >= 100);
    }

    #[test]
    fn el_redondeo_alinea_el_eje_de_bitpacks() {
        let requested = SampleShape::new(3, 13).unwrap();

        let rounded_u8 = WorkingSet::<u8>::rounded(requested);
        assert_eq!(rounded_u8.bitpacks_per_batch % 8, 0);
        assert!(rounded_u8.bitpacks_per_batch >= 13);

        let rounded_u64 = WorkingSet::<u64>::rounded(requested);
        assert_eq!(rounded_u64.bitpacks_per_batch, 13);
    }

    #[test]
    fn la_forma_optima_respeta_la_memoria_del_dispositivo() {
        let profile = DeviceProfile::synthetic_gpu(1024, &[32]);
        let shape = WorkingSet::<u64>::optimal_sample_shape(&profile, 1000);

        let used_bytes = 1000u64 * shape.num_bitpacks() as u64 * 8;
        println!(
            "      🧮 [SHAPE]: batch={} bitpacks={} bytes={}",
            shape.batch_size, shape.bitpacks_per_batch, used_bytes
        );
        assert!(used_bytes <= profile.max_mem_alloc_size);
        assert!(shape.batch_size.is_power_of_two());
        assert!(shape.bitpacks_per_batch.is_power_of_two());
    }

    proptest::proptest! {
        /// El producto local jamás excede el límite del work-group y
        /// el acolchado global es múltiplo exacto del local.
        #[test]
        fn el_presupuesto_respeta_el_limite_en_todo_el_espacio(
            max_work_group_size in 1usize..4096,
            num_events in 1usize..5000,
            batch_size in 1usize..5000,
            bitpacks_per_batch in 1usize..5000,
        ) {
            let profile = DeviceProfile::synthetic_gpu(max_work_group_size, &[32]);
            let shape = SampleShape::new(batch_size, bitpacks_per_batch).unwrap();
            let planner = WorkingSet::<u64>::new(&profile, num_events, shape);

            let local = planner.local_range(Range3::unbounded());
            proptest::prop_assert!(local.product() <= max_work_group_size);

            let nd_range = planner.nd_range(local);
            proptest::prop_assert_eq!(nd_range.global.events % nd_range.local.events, 0);
            proptest::prop_assert_eq!(nd_range.global.batch % nd_range.local.batch, 0);
            proptest::prop_assert_eq!(nd_range.global.bitpacks % nd_range.local.bitpacks, 0);
        }
    }

    #[test]
    fn potencia_mas_cercana_con_empates_hacia_la_menor() {
        assert_eq!(closest_power_of_2(0), 1);
        assert_eq!(closest_power_of_2(3), 2);
        assert_eq!(closest_power_of_2(6), 4);
        assert_eq!(closest_power_of_2(12), 8);
        assert_eq!(closest_power_of_2(48), 32);
        assert_eq!(closest_power_of_2(1 << 20), 1 << 20);
    }
}
