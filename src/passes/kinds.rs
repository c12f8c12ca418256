// src/passes/kinds.rs

//! External and internal pass kinds, their canonical names, and the tile shape
//! each external pass is serialized with.

/// Number of internal pass slots an accumulator can ever allocate.
pub const INTERNAL_PASS_COUNT: usize = InternalPassKind::ALL.len();

/// Output channel identities a host application can request.
///
/// Names match the host's pass property names ("Depth", "IndexOB", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExternalPassKind {
    Disabled,
    Combined,
    Depth,
    Vector,
    Normal,
    Uv,
    Color,
    Emit,
    Mist,
    Diffuse,
    Specular,
    Ao,
    Env,
    Indirect,
    Shadow,
    Reflect,
    Refract,
    ObjIndex,
    MatIndex,
    DiffuseDirect,
    DiffuseIndirect,
    DiffuseColor,
    GlossyDirect,
    GlossyIndirect,
    GlossyColor,
    TransDirect,
    TransIndirect,
    TransColor,
    SubsurfaceDirect,
    SubsurfaceIndirect,
    SubsurfaceColor,
}

impl ExternalPassKind {
    /// Every real external kind, in catalog order. `Disabled` is excluded.
    pub const ALL: [ExternalPassKind; 30] = [
        ExternalPassKind::Combined,
        ExternalPassKind::Depth,
        ExternalPassKind::Vector,
        ExternalPassKind::Normal,
        ExternalPassKind::Uv,
        ExternalPassKind::Color,
        ExternalPassKind::Emit,
        ExternalPassKind::Mist,
        ExternalPassKind::Diffuse,
        ExternalPassKind::Specular,
        ExternalPassKind::Ao,
        ExternalPassKind::Env,
        ExternalPassKind::Indirect,
        ExternalPassKind::Shadow,
        ExternalPassKind::Reflect,
        ExternalPassKind::Refract,
        ExternalPassKind::ObjIndex,
        ExternalPassKind::MatIndex,
        ExternalPassKind::DiffuseDirect,
        ExternalPassKind::DiffuseIndirect,
        ExternalPassKind::DiffuseColor,
        ExternalPassKind::GlossyDirect,
        ExternalPassKind::GlossyIndirect,
        ExternalPassKind::GlossyColor,
        ExternalPassKind::TransDirect,
        ExternalPassKind::TransIndirect,
        ExternalPassKind::TransColor,
        ExternalPassKind::SubsurfaceDirect,
        ExternalPassKind::SubsurfaceIndirect,
        ExternalPassKind::SubsurfaceColor,
    ];

    /// Canonical host-side name. `None` for `Disabled`.
    pub fn name(self) -> Option<&'static str> {
        use ExternalPassKind::*;
        let name = match self {
            Disabled => return None,
            Combined => "Combined",
            Depth => "Depth",
            Vector => "Vector",
            Normal => "Normal",
            Uv => "UV",
            Color => "Color",
            Emit => "Emit",
            Mist => "Mist",
            Diffuse => "Diffuse",
            Specular => "Spec",
            Ao => "AO",
            Env => "Env",
            Indirect => "Indirect",
            Shadow => "Shadow",
            Reflect => "Reflect",
            Refract => "Refract",
            ObjIndex => "IndexOB",
            MatIndex => "IndexMA",
            DiffuseDirect => "DiffDir",
            DiffuseIndirect => "DiffInd",
            DiffuseColor => "DiffCol",
            GlossyDirect => "GlossDir",
            GlossyIndirect => "GlossInd",
            GlossyColor => "GlossCol",
            TransDirect => "TransDir",
            TransIndirect => "TransInd",
            TransColor => "TransCol",
            SubsurfaceDirect => "SubsurfaceDir",
            SubsurfaceIndirect => "SubsurfaceInd",
            SubsurfaceColor => "SubsurfaceCol",
        };
        Some(name)
    }

    /// Channel layout this pass is written with.
    pub fn tile_shape(self) -> TileShape {
        match self {
            ExternalPassKind::Depth
            | ExternalPassKind::Mist
            | ExternalPassKind::ObjIndex
            | ExternalPassKind::MatIndex => TileShape::Gray1,
            ExternalPassKind::Combined | ExternalPassKind::Vector | ExternalPassKind::Color => {
                TileShape::Rgba4
            }
            _ => TileShape::Rgb3,
        }
    }
}

/// Number of channels an external pass occupies in an output tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileShape {
    Gray1,
    Rgb3,
    Rgba4,
}

impl TileShape {
    pub fn channels(self) -> usize {
        match self {
            TileShape::Gray1 => 1,
            TileShape::Rgb3 => 3,
            TileShape::Rgba4 => 4,
        }
    }
}

/// Quantities the renderer computes internally.
///
/// Every kind except `Disabled` owns a dense slot index (`Combined` is slot 0),
/// which is what accumulators are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InternalPassKind {
    Disabled,
    Combined,
    ZDepthNorm,
    ZDepthAbs,
    NormalSmooth,
    NormalGeom,
    Radiance,
    Uv,
    Emit,
    Mist,
    Diffuse,
    DiffuseNoShadow,
    Ao,
    AoClay,
    Env,
    IndirectAll,
    Indirect,
    Shadow,
    ReflectPerfect,
    RefractPerfect,
    ReflectAll,
    RefractAll,
    ObjIndexAbs,
    ObjIndexNorm,
    ObjIndexAuto,
    ObjIndexMask,
    ObjIndexMaskShadow,
    ObjIndexMaskAll,
    MatIndexAbs,
    MatIndexNorm,
    MatIndexAuto,
    MatIndexMask,
    MatIndexMaskShadow,
    MatIndexMaskAll,
    DiffuseIndirect,
    DiffuseColor,
    Glossy,
    GlossyIndirect,
    GlossyColor,
    Trans,
    TransIndirect,
    TransColor,
    Subsurface,
    SubsurfaceIndirect,
    SubsurfaceColor,
    SurfaceIntegration,
    VolumeIntegration,
    VolumeTransmittance,
    DebugNu,
    DebugNv,
    DebugDpdu,
    DebugDpdv,
    DebugDsdu,
    DebugDsdv,
    AaSamples,
    DebugLightEstimationLightDirac,
    DebugLightEstimationLightSampling,
    DebugLightEstimationMatSampling,
    DebugWireframe,
    DebugFacesEdges,
    DebugObjectsEdges,
    Toon,
    DebugSamplingFactor,
    DebugDpLengths,
    DebugDpdx,
    DebugDpdy,
    DebugDpdxy,
    DebugDudxDvdx,
    DebugDudyDvdy,
    DebugDudxyDvdxy,
}

impl InternalPassKind {
    /// Every real internal kind, ordered by slot index. `Disabled` is excluded.
    pub const ALL: [InternalPassKind; 69] = {
        use InternalPassKind::*;
        [
            Combined,
            ZDepthNorm,
            ZDepthAbs,
            NormalSmooth,
            NormalGeom,
            Radiance,
            Uv,
            Emit,
            Mist,
            Diffuse,
            DiffuseNoShadow,
            Ao,
            AoClay,
            Env,
            IndirectAll,
            Indirect,
            Shadow,
            ReflectPerfect,
            RefractPerfect,
            ReflectAll,
            RefractAll,
            ObjIndexAbs,
            ObjIndexNorm,
            ObjIndexAuto,
            ObjIndexMask,
            ObjIndexMaskShadow,
            ObjIndexMaskAll,
            MatIndexAbs,
            MatIndexNorm,
            MatIndexAuto,
            MatIndexMask,
            MatIndexMaskShadow,
            MatIndexMaskAll,
            DiffuseIndirect,
            DiffuseColor,
            Glossy,
            GlossyIndirect,
            GlossyColor,
            Trans,
            TransIndirect,
            TransColor,
            Subsurface,
            SubsurfaceIndirect,
            SubsurfaceColor,
            SurfaceIntegration,
            VolumeIntegration,
            VolumeTransmittance,
            DebugNu,
            DebugNv,
            DebugDpdu,
            DebugDpdv,
            DebugDsdu,
            DebugDsdv,
            AaSamples,
            DebugLightEstimationLightDirac,
            DebugLightEstimationLightSampling,
            DebugLightEstimationMatSampling,
            DebugWireframe,
            DebugFacesEdges,
            DebugObjectsEdges,
            Toon,
            DebugSamplingFactor,
            DebugDpLengths,
            DebugDpdx,
            DebugDpdy,
            DebugDpdxy,
            DebugDudxDvdx,
            DebugDudyDvdy,
            DebugDudxyDvdxy,
        ]
    };

    /// Dense slot index, or `None` for `Disabled`.
    ///
    /// Discriminants follow declaration order with `Disabled` first, so the
    /// slot is one less than the discriminant.
    pub fn slot(self) -> Option<usize> {
        match self {
            InternalPassKind::Disabled => None,
            kind => Some(kind as usize - 1),
        }
    }

    /// Inverse of [`InternalPassKind::slot`].
    pub fn from_slot(slot: usize) -> Option<InternalPassKind> {
        Self::ALL.get(slot).copied()
    }

    /// Canonical configuration name. `None` for `Disabled`.
    pub fn name(self) -> Option<&'static str> {
        use InternalPassKind::*;
        let name = match self {
            Disabled => return None,
            Combined => "combined",
            ZDepthNorm => "z-depth-norm",
            ZDepthAbs => "z-depth-abs",
            NormalSmooth => "debug-normal-smooth",
            NormalGeom => "debug-normal-geom",
            Radiance => "adv-radiance",
            Uv => "debug-uv",
            Emit => "emit",
            Mist => "mist",
            Diffuse => "diffuse",
            DiffuseNoShadow => "diffuse-noshadow",
            Ao => "ao",
            AoClay => "ao-clay",
            Env => "env",
            IndirectAll => "indirect",
            Indirect => "adv-indirect",
            Shadow => "shadow",
            ReflectPerfect => "adv-reflect",
            RefractPerfect => "adv-refract",
            ReflectAll => "reflect",
            RefractAll => "refract",
            ObjIndexAbs => "obj-index-abs",
            ObjIndexNorm => "obj-index-norm",
            ObjIndexAuto => "obj-index-auto",
            ObjIndexMask => "obj-index-mask",
            ObjIndexMaskShadow => "obj-index-mask-shadow",
            ObjIndexMaskAll => "obj-index-mask-all",
            MatIndexAbs => "mat-index-abs",
            MatIndexNorm => "mat-index-norm",
            MatIndexAuto => "mat-index-auto",
            MatIndexMask => "mat-index-mask",
            MatIndexMaskShadow => "mat-index-mask-shadow",
            MatIndexMaskAll => "mat-index-mask-all",
            DiffuseIndirect => "adv-diffuse-indirect",
            DiffuseColor => "adv-diffuse-color",
            Glossy => "adv-glossy",
            GlossyIndirect => "adv-glossy-indirect",
            GlossyColor => "adv-glossy-color",
            Trans => "adv-trans",
            TransIndirect => "adv-trans-indirect",
            TransColor => "adv-trans-color",
            Subsurface => "adv-subsurface",
            SubsurfaceIndirect => "adv-subsurface-indirect",
            SubsurfaceColor => "adv-subsurface-color",
            SurfaceIntegration => "adv-surface-integration",
            VolumeIntegration => "adv-volume-integration",
            VolumeTransmittance => "adv-volume-transmittance",
            DebugNu => "debug-nu",
            DebugNv => "debug-nv",
            DebugDpdu => "debug-dpdu",
            DebugDpdv => "debug-dpdv",
            DebugDsdu => "debug-dsdu",
            DebugDsdv => "debug-dsdv",
            AaSamples => "debug-aa-samples",
            DebugLightEstimationLightDirac => "debug-light-estimation-light-dirac",
            DebugLightEstimationLightSampling => "debug-light-estimation-light-sampling",
            DebugLightEstimationMatSampling => "debug-light-estimation-mat-sampling",
            DebugWireframe => "debug-wireframe",
            DebugFacesEdges => "debug-faces-edges",
            DebugObjectsEdges => "debug-objects-edges",
            Toon => "toon",
            DebugSamplingFactor => "debug-sampling-factor",
            DebugDpLengths => "debug-dp-lengths",
            DebugDpdx => "debug-dpdx",
            DebugDpdy => "debug-dpdy",
            DebugDpdxy => "debug-dpdxy",
            DebugDudxDvdx => "debug-dudx-dvdx",
            DebugDudyDvdy => "debug-dudy-dvdy",
            DebugDudxyDvdxy => "debug-dudxy-dvdxy",
        };
        Some(name)
    }

    /// True for kinds whose slots start out transparent so they can be used
    /// directly as alpha masks.
    pub fn is_mask(self) -> bool {
        matches!(
            self,
            InternalPassKind::Shadow
                | InternalPassKind::ObjIndexMask
                | InternalPassKind::ObjIndexMaskShadow
                | InternalPassKind::ObjIndexMaskAll
                | InternalPassKind::MatIndexMask
                | InternalPassKind::MatIndexMaskShadow
                | InternalPassKind::MatIndexMaskAll
        )
    }
}
