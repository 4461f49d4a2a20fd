/*
 * @Description  : GraphInner 节点构建方法（new_*_node）
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::NodeHandle;
use crate::nn::NodeId;

impl GraphInner {
    /// 添加节点到列表
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_id = self.generate_valid_node_id();
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_type)?;

        for &parent_id in parents {
            self.forward_edges
                .entry(parent_id)
                .or_default()
                .push(node_id);
        }
        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    /// 创建输入节点，`shape`的第一维为 batch 维
    pub fn new_input_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_input(shape)?;
        self.add_node_to_list(node, name, "input", &[])
    }

    /// 创建参数节点（值需随后通过 set_node_value 初始化）
    pub fn new_parameter_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_parameter(shape)?;
        self.add_node_to_list(node, name, "parameter", &[])
    }

    pub fn new_add_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_add(&self.get_nodes(parents)?)?;
        self.add_node_to_list(node, name, "add", parents)
    }

    pub fn new_mat_mul_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parents = [left_node_id, right_node_id];
        let node = NodeHandle::new_mat_mul(&self.get_nodes(&parents)?)?;
        self.add_node_to_list(node, name, "mat_mul", &parents)
    }

    pub fn new_leaky_relu_node(
        &mut self,
        parent_id: NodeId,
        negative_slope: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_leaky_relu(&self.get_nodes(&[parent_id])?, negative_slope)?;
        let node_type = if negative_slope == 0.0 {
            "relu"
        } else {
            "leaky_relu"
        };
        self.add_node_to_list(node, name, node_type, &[parent_id])
    }

    pub fn new_relu_node(
        &mut self,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_leaky_relu_node(parent_id, 0.0, name)
    }

    pub fn new_sigmoid_node(
        &mut self,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_sigmoid(&self.get_nodes(&[parent_id])?)?;
        self.add_node_to_list(node, name, "sigmoid", &[parent_id])
    }

    pub fn new_tanh_node(
        &mut self,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_tanh(&self.get_nodes(&[parent_id])?)?;
        self.add_node_to_list(node, name, "tanh", &[parent_id])
    }

    /// 创建 Dropout 节点，掩码种子取自图的随机数生成器
    pub fn new_dropout_node(
        &mut self,
        parent_id: NodeId,
        p: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let seed = self.next_seed();
        let node = NodeHandle::new_dropout(&self.get_nodes(&[parent_id])?, p, seed)?;
        self.add_node_to_list(node, name, "dropout", &[parent_id])
    }

    pub fn new_mse_loss_node(
        &mut self,
        input_id: NodeId,
        target_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parents = [input_id, target_id];
        let node = NodeHandle::new_mse_loss(&self.get_nodes(&parents)?)?;
        self.add_node_to_list(node, name, "mse_loss", &parents)
    }
}
