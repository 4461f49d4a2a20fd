mod node_data;
