//! Opcode and enumerant values the loader and the built-in checks look at.
//!
//! Only the handful the linter inspects are listed; everything else is
//! carried through as a raw `u16`.

pub const MAGIC: u32 = 0x0723_0203;

pub const UNDEF: u16 = 1;
pub const NAME: u16 = 5;
pub const ENTRY_POINT: u16 = 15;
pub const EXECUTION_MODE: u16 = 16;
pub const FUNCTION: u16 = 54;
pub const FUNCTION_PARAMETER: u16 = 55;
pub const FUNCTION_END: u16 = 56;
pub const FUNCTION_CALL: u16 = 57;
pub const LOAD: u16 = 61;
pub const STORE: u16 = 62;
pub const IMAGE_SAMPLE_IMPLICIT_LOD: u16 = 87;
pub const IMAGE_SAMPLE_DREF_IMPLICIT_LOD: u16 = 89;
pub const IMAGE_SAMPLE_PROJ_IMPLICIT_LOD: u16 = 91;
pub const IMAGE_SAMPLE_PROJ_DREF_IMPLICIT_LOD: u16 = 93;
pub const IMAGE_QUERY_LOD: u16 = 105;
pub const DPDX: u16 = 207;
pub const DPDY: u16 = 208;
pub const FWIDTH: u16 = 209;
pub const DPDX_FINE: u16 = 210;
pub const DPDY_FINE: u16 = 211;
pub const FWIDTH_FINE: u16 = 212;
pub const DPDX_COARSE: u16 = 213;
pub const DPDY_COARSE: u16 = 214;
pub const FWIDTH_COARSE: u16 = 215;
pub const BRANCH_CONDITIONAL: u16 = 250;
pub const SWITCH: u16 = 251;
pub const RETURN_VALUE: u16 = 254;
pub const IMAGE_SPARSE_SAMPLE_IMPLICIT_LOD: u16 = 305;
pub const IMAGE_SPARSE_SAMPLE_DREF_IMPLICIT_LOD: u16 = 307;
pub const IMAGE_SPARSE_SAMPLE_PROJ_IMPLICIT_LOD: u16 = 309;
pub const IMAGE_SPARSE_SAMPLE_PROJ_DREF_IMPLICIT_LOD: u16 = 311;

/// Human-readable name of an opcode, for the ones listed here.
pub fn name(opcode: u16) -> Option<&'static str> {
    let name = match opcode {
        UNDEF => "OpUndef",
        NAME => "OpName",
        ENTRY_POINT => "OpEntryPoint",
        EXECUTION_MODE => "OpExecutionMode",
        FUNCTION => "OpFunction",
        FUNCTION_PARAMETER => "OpFunctionParameter",
        FUNCTION_END => "OpFunctionEnd",
        FUNCTION_CALL => "OpFunctionCall",
        LOAD => "OpLoad",
        STORE => "OpStore",
        IMAGE_SAMPLE_IMPLICIT_LOD => "OpImageSampleImplicitLod",
        IMAGE_SAMPLE_DREF_IMPLICIT_LOD => "OpImageSampleDrefImplicitLod",
        IMAGE_SAMPLE_PROJ_IMPLICIT_LOD => "OpImageSampleProjImplicitLod",
        IMAGE_SAMPLE_PROJ_DREF_IMPLICIT_LOD => "OpImageSampleProjDrefImplicitLod",
        IMAGE_QUERY_LOD => "OpImageQueryLod",
        DPDX => "OpDPdx",
        DPDY => "OpDPdy",
        FWIDTH => "OpFwidth",
        DPDX_FINE => "OpDPdxFine",
        DPDY_FINE => "OpDPdyFine",
        FWIDTH_FINE => "OpFwidthFine",
        DPDX_COARSE => "OpDPdxCoarse",
        DPDY_COARSE => "OpDPdyCoarse",
        FWIDTH_COARSE => "OpFwidthCoarse",
        BRANCH_CONDITIONAL => "OpBranchConditional",
        SWITCH => "OpSwitch",
        RETURN_VALUE => "OpReturnValue",
        IMAGE_SPARSE_SAMPLE_IMPLICIT_LOD => "OpImageSparseSampleImplicitLod",
        IMAGE_SPARSE_SAMPLE_DREF_IMPLICIT_LOD => "OpImageSparseSampleDrefImplicitLod",
        IMAGE_SPARSE_SAMPLE_PROJ_IMPLICIT_LOD => "OpImageSparseSampleProjImplicitLod",
        IMAGE_SPARSE_SAMPLE_PROJ_DREF_IMPLICIT_LOD => "OpImageSparseSampleProjDrefImplicitLod",
        _ => return None,
    };
    Some(name)
}

/// `ExecutionModel` operand values.
pub mod model {
    pub const VERTEX: u32 = 0;
    pub const TESSELLATION_CONTROL: u32 = 1;
    pub const TESSELLATION_EVALUATION: u32 = 2;
    pub const GEOMETRY: u32 = 3;
    pub const FRAGMENT: u32 = 4;
    pub const GL_COMPUTE: u32 = 5;
    pub const KERNEL: u32 = 6;
    pub const TASK_NV: u32 = 5267;
    pub const MESH_NV: u32 = 5268;
    pub const TASK_EXT: u32 = 5364;
    pub const MESH_EXT: u32 = 5365;

    pub fn name(model: u32) -> &'static str {
        match model {
            VERTEX => "Vertex",
            TESSELLATION_CONTROL => "TessellationControl",
            TESSELLATION_EVALUATION => "TessellationEvaluation",
            GEOMETRY => "Geometry",
            FRAGMENT => "Fragment",
            GL_COMPUTE => "GLCompute",
            KERNEL => "Kernel",
            TASK_NV => "TaskNV",
            MESH_NV => "MeshNV",
            TASK_EXT => "TaskEXT",
            MESH_EXT => "MeshEXT",
            _ => "unknown",
        }
    }
}

/// `ExecutionMode` operand values.
pub mod mode {
    pub const DERIVATIVE_GROUP_QUADS: u32 = 5289;
    pub const DERIVATIVE_GROUP_LINEAR: u32 = 5290;
}
