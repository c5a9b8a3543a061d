//! Referenced-types pass.

use crate::{
    analysis::{
        algorithms::{reachability::reach_type, AlgorithmKind, RequiredAssemblies, UsageAlgorithm},
        strategies::LiveSet,
        AnalysisContext,
    },
    metadata::{
        entity::{AssemblyRc, ProjectReference},
        identity::TypeId,
    },
    Error, Result,
};

/// Proves required every assembly mentioned by the unit's member signatures and
/// custom attribute arguments.
///
/// Mentions are collected from the unit's assembly-level attributes and from
/// every type's member signatures, member-level attributes, and type-level
/// attributes, recursing through generic instantiations. Each distinct mentioned type is then pushed through the full
/// reachability sequence, so a signature mention pulls in the mentioned type's
/// own hierarchy and interfaces as well.
pub struct ReferencedTypesAlgorithm;

impl UsageAlgorithm for ReferencedTypesAlgorithm {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::ReferencedTypes
    }

    fn collect(
        &self,
        unit: &AssemblyRc,
        _required: &RequiredAssemblies,
        _candidates: &[ProjectReference],
        ctx: &AnalysisContext<'_>,
    ) -> Result<RequiredAssemblies> {
        let mut ids: Vec<&TypeId> = Vec::new();
        for attribute in &unit.custom_attributes {
            for reference in attribute.referenced_types() {
                reference.collect_ids(&mut ids);
            }
        }
        for ty in &unit.types {
            for reference in ty.referenced_types() {
                reference.collect_ids(&mut ids);
            }
        }

        let mut live = LiveSet::new();
        for id in ids {
            // A mention alone makes the named assembly (and a forwarding origin)
            // live, whether or not the definition still needs processing.
            live.insert(id.assembly.clone());
            if let Some(from) = &id.forwarded_from {
                live.insert(from.clone());
            }

            if ctx.cache.contains(id) {
                continue;
            }
            let definition =
                ctx.reader
                    .type_definition(id)
                    .map_err(|_| Error::TypeResolution {
                        type_name: id.qualified_name(),
                        context: "referenced types",
                    })?;
            live.union_with(reach_type(&definition, ctx)?);
        }

        let mut proven = RequiredAssemblies::new();
        proven.extend_from(live, self.kind());
        Ok(proven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        entity::{AssemblyBuilder, CustomAttribute, Member, TypeDefinitionBuilder, TypeReference},
        identity::{AssemblyIdentity, AssemblyVersion},
        reader::{MemoryReader, MetadataReader},
    };

    fn asm(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    #[test]
    fn test_signature_mentions_are_proven() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("Models", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("Models.Order", asm("Models"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("App.Service", asm("App"))
                        .member(Member::method(
                            "Load",
                            TypeReference::definition(TypeId::new("Models.Order", asm("Models"))),
                            Vec::new(),
                        ))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );

        let ctx = AnalysisContext::new(&reader);
        let unit = reader.assembly(&asm("App")).unwrap();

        let proven = ReferencedTypesAlgorithm
            .collect(&unit, &RequiredAssemblies::new(), &[], &ctx)
            .unwrap();

        assert_eq!(
            proven.provenance(&asm("Models")),
            Some(AlgorithmKind::ReferencedTypes)
        );
    }

    #[test]
    fn test_generic_argument_mentions_are_proven() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("mscorlib", AssemblyVersion::new(4, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new(
                        "System.Collections.Generic.List`1",
                        AssemblyIdentity::new(
                            "mscorlib",
                            AssemblyVersion::new(4, 0, 0, 0),
                            None,
                            None,
                        ),
                    )
                    .build()
                    .unwrap(),
                )
                .build()
                .unwrap(),
        );
        reader.insert(
            AssemblyBuilder::new("Models", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("Models.Order", asm("Models"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );

        let mscorlib =
            AssemblyIdentity::new("mscorlib", AssemblyVersion::new(4, 0, 0, 0), None, None);
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("App.Repo", asm("App"))
                        .member(Member::field(
                            "orders",
                            TypeReference::generic(
                                TypeId::new("System.Collections.Generic.List`1", mscorlib.clone()),
                                vec![TypeReference::definition(TypeId::new(
                                    "Models.Order",
                                    asm("Models"),
                                ))],
                            ),
                        ))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );

        let ctx = AnalysisContext::new(&reader);
        let unit = reader.assembly(&asm("App")).unwrap();

        let proven = ReferencedTypesAlgorithm
            .collect(&unit, &RequiredAssemblies::new(), &[], &ctx)
            .unwrap();

        assert!(proven.contains(&mscorlib));
        assert!(proven.contains(&asm("Models")));
    }

    #[test]
    fn test_attribute_argument_mentions_are_proven() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("Annotations", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("Annotations.MarkerAttribute", asm("Annotations"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .attribute(CustomAttribute::new(TypeReference::definition(TypeId::new(
                    "Annotations.MarkerAttribute",
                    asm("Annotations"),
                ))))
                .build()
                .unwrap(),
        );

        let ctx = AnalysisContext::new(&reader);
        let unit = reader.assembly(&asm("App")).unwrap();

        let proven = ReferencedTypesAlgorithm
            .collect(&unit, &RequiredAssemblies::new(), &[], &ctx)
            .unwrap();

        assert!(proven.contains(&asm("Annotations")));
    }

    #[test]
    fn test_member_attribute_mentions_are_proven() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("Validation", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("Validation.RequiredAttribute", asm("Validation"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("App.Order", asm("App"))
                        .member(
                            Member::property(
                                "Customer",
                                TypeReference::definition(TypeId::new(
                                    "System.String",
                                    asm("App"),
                                )),
                            )
                            .attribute(CustomAttribute::new(TypeReference::definition(
                                TypeId::new("Validation.RequiredAttribute", asm("Validation")),
                            ))),
                        )
                        .build()
                        .unwrap(),
                )
                .define_type(
                    TypeDefinitionBuilder::new("System.String", asm("App"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );

        let ctx = AnalysisContext::new(&reader);
        let unit = reader.assembly(&asm("App")).unwrap();

        let proven = ReferencedTypesAlgorithm
            .collect(&unit, &RequiredAssemblies::new(), &[], &ctx)
            .unwrap();

        assert_eq!(
            proven.provenance(&asm("Validation")),
            Some(AlgorithmKind::ReferencedTypes)
        );
    }

    #[test]
    fn test_unresolvable_mention_is_an_error() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("App.Service", asm("App"))
                        .member(Member::property(
                            "Gone",
                            TypeReference::definition(TypeId::new("Gone.Type", asm("Gone"))),
                        ))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );

        let ctx = AnalysisContext::new(&reader);
        let unit = reader.assembly(&asm("App")).unwrap();

        let error = ReferencedTypesAlgorithm
            .collect(&unit, &RequiredAssemblies::new(), &[], &ctx)
            .unwrap_err();
        assert!(matches!(error, Error::TypeResolution { .. }));
    }
}
