//! Validates the code examples from README.md compile and behave correctly.

#[test]
fn readme_generate_and_save() {
    use etcdxt::{EndpointBits, Generator, GeneratorConfig, solutions_from_le_bytes};

    let generator =
        Generator::new(GeneratorConfig::default().with_bits(EndpointBits::Five)).unwrap();
    let table = generator.generate();
    assert_eq!(table.entries().len(), 8 * 32 * 6 * 10);

    let bytes = table.to_le_bytes();
    assert_eq!(bytes.len(), table.entries().len() * 4);
    let reloaded = solutions_from_le_bytes(&bytes).unwrap();
    table.verify(&reloaded).unwrap();
}

#[test]
fn readme_lookup() {
    use etcdxt::{Generator, GeneratorConfig, Solution, Tuple};

    let generator = Generator::new(GeneratorConfig::default()).unwrap();
    let best = generator.solve(Tuple {
        intensity: 0,
        green: 0,
        range: 0,
        mapping: 6,
    });
    assert_eq!(best, Solution { low: 0, high: 2, error: 13 });
}

#[test]
fn readme_parallel() {
    use etcdxt::{EndpointBits, Generator, GeneratorConfig, Solution};

    let generator =
        Generator::new(GeneratorConfig::default().with_bits(EndpointBits::Five)).unwrap();
    let layout = generator.layout();
    let mut entries = vec![Solution::default(); layout.len()];
    std::thread::scope(|s| {
        for (intensity, block) in entries.chunks_mut(layout.intensity_len()).enumerate() {
            let generator = &generator;
            s.spawn(move || generator.generate_intensity(intensity, block).unwrap());
        }
    });
    generator.generate().verify(&entries).unwrap();
}

#[test]
fn readme_custom_sets() {
    use etcdxt::{Generator, GeneratorConfig, SelectorMapping, SelectorRange, Slot, TableError};

    let config = GeneratorConfig::default()
        .with_ranges(&[SelectorRange::ALL, SelectorRange::new(1, 2)])
        .with_mappings(&[
            SelectorMapping::IDENTITY,
            SelectorMapping([Slot::Lane(0), Slot::Lane(0), Slot::Lane(3), Slot::Zero]),
        ]);
    let generator = Generator::new(config).unwrap();
    assert_eq!(generator.layout().len(), 8 * 32 * 2 * 2);

    let bad = GeneratorConfig::default().with_ranges(&[SelectorRange::new(2, 5)]);
    assert!(matches!(
        Generator::new(bad),
        Err(TableError::InvalidRange { index: 0, .. })
    ));
}
