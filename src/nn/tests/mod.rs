mod graph_basic;
mod layer_mlp;
mod optimizer;
mod save_load;
