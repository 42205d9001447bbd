mod chassis_loading;
mod chassis_settle;
mod shape_matching;
mod strut_relaxation;
