pub mod stage1_load;
pub mod stage2_aggregate;
pub mod stage3_normalize;
pub mod stage4_store;
