//! Traversal-level properties: forwarding, diamonds, memoization, and the
//! error surface of unresolvable metadata.

use refscope::{analysis::algorithms::AlgorithmKind, prelude::*, Result};
use uguid::guid;

fn asm(name: &str) -> AssemblyIdentity {
    AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
}

fn reference(name: &str) -> ProjectReference {
    ProjectReference::new(name, asm(name), format!("packages/{name}.dll"))
}

/// Reaching a type through a forwarder keeps both the forwarding origin and the
/// new defining assembly alive: the origin still owns the manifest stub old
/// callers bind against.
#[test]
fn test_forwarded_base_type_keeps_both_assemblies() -> Result<()> {
    let mut reader = MemoryReader::new();
    reader.insert(
        AssemblyBuilder::new("NewHome", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("Shared.Base", asm("NewHome"))
                    .public()
                    .forwarded_from(asm("OldHome"))
                    .build()?,
            )
            .build()?,
    );
    reader.insert(AssemblyBuilder::new("OldHome", AssemblyVersion::new(1, 0, 0, 0)).build()?);
    reader.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("App.Derived", asm("App"))
                    .base_type(TypeId::new("Shared.Base", asm("NewHome")))
                    .build()?,
            )
            .build()?,
    );

    let report = ReferenceAnalyzer::new(&reader).analyze(
        &asm("App"),
        vec![reference("NewHome"), reference("OldHome")],
    )?;

    assert!(report.unused.is_empty());
    for retained in &report.retained {
        assert_eq!(retained.proved_by, AlgorithmKind::TypeReachability);
    }
    Ok(())
}

/// Diamond-shaped interface graphs terminate and count every assembly once.
#[test]
fn test_diamond_interface_graph_terminates() -> Result<()> {
    let mut reader = MemoryReader::new();
    reader.insert(
        AssemblyBuilder::new("Core", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("Core.IRoot", asm("Core"))
                    .interface()
                    .build()?,
            )
            .build()?,
    );
    reader.insert(
        AssemblyBuilder::new("Left", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("Left.ILeft", asm("Left"))
                    .interface()
                    .implements(TypeId::new("Core.IRoot", asm("Core")))
                    .build()?,
            )
            .build()?,
    );
    reader.insert(
        AssemblyBuilder::new("Right", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("Right.IRight", asm("Right"))
                    .interface()
                    .implements(TypeId::new("Core.IRoot", asm("Core")))
                    .build()?,
            )
            .build()?,
    );
    reader.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("App.Both", asm("App"))
                    .implements(TypeId::new("Left.ILeft", asm("Left")))
                    .implements(TypeId::new("Right.IRight", asm("Right")))
                    .build()?,
            )
            .build()?,
    );

    let report = ReferenceAnalyzer::new(&reader).analyze(
        &asm("App"),
        vec![reference("Core"), reference("Left"), reference("Right")],
    )?;

    assert!(report.unused.is_empty());
    assert_eq!(report.retained.len(), 3);
    Ok(())
}

/// Two runs over the same unit produce identical partitions; each run owns a
/// fresh cache, so nothing leaks from the first into the second.
#[test]
fn test_analysis_is_repeatable() -> Result<()> {
    let mut reader = MemoryReader::new();
    reader.insert(
        AssemblyBuilder::new("Lib", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(TypeDefinitionBuilder::new("Lib.Base", asm("Lib")).build()?)
            .build()?,
    );
    reader.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("App.Derived", asm("App"))
                    .base_type(TypeId::new("Lib.Base", asm("Lib")))
                    .build()?,
            )
            .build()?,
    );

    let analyzer = ReferenceAnalyzer::new(&reader);
    let candidates = || vec![reference("Lib"), reference("Stale")];

    let first = analyzer.analyze(&asm("App"), candidates())?;
    let second = analyzer.analyze(&asm("App"), candidates())?;

    assert_eq!(first.unused.len(), second.unused.len());
    assert_eq!(first.retained.len(), second.retained.len());
    assert_eq!(first.unused[0].name, "Stale");
    assert_eq!(second.unused[0].name, "Stale");
    Ok(())
}

/// An embedded copy with no matching origin aborts the unit: some candidate's
/// liveness would be indeterminate, so no partial report is produced.
#[test]
fn test_unresolvable_embedding_aborts_the_unit() -> Result<()> {
    let mut reader = MemoryReader::new();
    reader.insert(AssemblyBuilder::new("Unrelated", AssemblyVersion::new(1, 0, 0, 0)).build()?);
    reader.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("Vendor.IDevice", asm("App"))
                    .interface()
                    .imported(ImportMarker::with_identifier(
                        guid!("deadbeef-0000-0000-0000-000000000000"),
                        "Vendor.IDevice",
                    ))
                    .build()?,
            )
            .build()?,
    );

    let result =
        ReferenceAnalyzer::new(&reader).analyze(&asm("App"), vec![reference("Unrelated")]);

    assert!(matches!(result, Err(Error::UnresolvedImport { .. })));
    Ok(())
}

/// A reader that closes a base-type chain on itself must abort the unit with a
/// resolution error rather than walk the cycle forever.
#[test]
fn test_cyclic_base_types_abort_the_unit() -> Result<()> {
    let mut reader = MemoryReader::new();
    reader.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("App.First", asm("App"))
                    .base_type(TypeId::new("App.Second", asm("App")))
                    .build()?,
            )
            .define_type(
                TypeDefinitionBuilder::new("App.Second", asm("App"))
                    .base_type(TypeId::new("App.First", asm("App")))
                    .build()?,
            )
            .build()?,
    );

    let result = ReferenceAnalyzer::new(&reader).analyze(&asm("App"), vec![reference("Lib")]);

    assert!(matches!(result, Err(Error::TypeResolution { .. })));
    Ok(())
}

/// Project files routinely declare a looser version than the compiled manifest
/// carries; a compatible newer proof still matches the declared candidate.
#[test]
fn test_version_compatible_proof_matches_declared_candidate() -> Result<()> {
    let manifest_identity =
        AssemblyIdentity::parse("Newtonsoft.Json, Version=13.0.3.27908, Culture=neutral")?;

    let mut reader = MemoryReader::new();
    reader.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .reference(manifest_identity)
            .build()?,
    );

    let declared = AssemblyIdentity::new(
        "Newtonsoft.Json",
        AssemblyVersion::new(13, 0, 0, 0),
        None,
        None,
    );
    let candidates = vec![ProjectReference::new(
        "Newtonsoft.Json",
        declared,
        "packages/Newtonsoft.Json.dll",
    )];

    let report = ReferenceAnalyzer::new(&reader).analyze(&asm("App"), candidates)?;
    assert!(report.unused.is_empty());
    assert_eq!(report.retained[0].proved_by, AlgorithmKind::Manifest);
    Ok(())
}

/// Deep single-inheritance chains resolve in one pass and share cached ancestry
/// between sibling types.
#[test]
fn test_shared_ancestry_is_walked_once() -> Result<()> {
    let mut reader = MemoryReader::new();
    reader.insert(
        AssemblyBuilder::new("Base", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(TypeDefinitionBuilder::new("Base.Root", asm("Base")).build()?)
            .build()?,
    );

    let mut app = AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0));
    for name in ["App.First", "App.Second", "App.Third"] {
        app = app.define_type(
            TypeDefinitionBuilder::new(name, asm("App"))
                .base_type(TypeId::new("Base.Root", asm("Base")))
                .build()?,
        );
    }
    reader.insert(app.build()?);

    let report = ReferenceAnalyzer::new(&reader)
        .analyze(&asm("App"), vec![reference("Base"), reference("Stale")])?;

    assert_eq!(report.unused.len(), 1);
    assert_eq!(report.unused[0].name, "Stale");
    Ok(())
}

/// The caching reader decorator is transparent to the analysis.
#[test]
fn test_caching_reader_is_transparent() -> Result<()> {
    let mut inner = MemoryReader::new();
    inner.insert(
        AssemblyBuilder::new("Lib", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(TypeDefinitionBuilder::new("Lib.Base", asm("Lib")).build()?)
            .build()?,
    );
    inner.insert(
        AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                TypeDefinitionBuilder::new("App.Derived", asm("App"))
                    .base_type(TypeId::new("Lib.Base", asm("Lib")))
                    .build()?,
            )
            .build()?,
    );

    let cached = CachingReader::new(inner);
    let report = ReferenceAnalyzer::new(&cached)
        .analyze(&asm("App"), vec![reference("Lib"), reference("Stale")])?;

    assert_eq!(report.unused.len(), 1);
    assert!(!cached.cache().is_empty());
    Ok(())
}
