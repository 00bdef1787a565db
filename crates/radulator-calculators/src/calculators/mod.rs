pub mod adrenal_ct;
pub mod adrenal_mri;
pub mod albi;
pub mod aspects;
pub mod bi_rads;
pub mod bosniak;
pub mod cad_rads;
pub mod child_pugh;
pub mod dlp_dose;
pub mod hip_graf;
pub mod ipss;
pub mod li_rads;
pub mod lung_rads;
pub mod mehran;
pub mod meld_na;
pub mod milan;
pub mod pi_rads;
pub mod prostate_volume;
pub mod renal_nephrometry;
pub mod shim;
pub mod spleen_size;
pub mod y90;
