/*
 * @Description  : GraphInner VJP 反向传播
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeType;
use crate::tensor::Tensor;
use std::collections::HashSet;

impl GraphInner {
    // ========== VJP 反向传播核心 ==========

    /// 反向传播：计算损失对所有参数的梯度，返回损失的标量值。
    /// 参数节点的梯度会累加（需由优化器的 zero_grad 清零），中间结果在结束后释放
    pub fn backward(&mut self, loss: NodeId) -> Result<f32, GraphError> {
        self.backward_ex(loss, false)
    }

    /// 反向传播（扩展版本）：`retain_graph`为 true 时保留中间节点的值与梯度
    pub fn backward_ex(&mut self, loss: NodeId, retain_graph: bool) -> Result<f32, GraphError> {
        let loss_node = self.get_node(loss)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失{loss_node}没有值，请先执行 forward"))
        })?;
        let loss_scalar = loss_value.get_data_number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量 [1, 1]，但得到 {:?}",
                loss_value.shape()
            ))
        })?;

        if !self.is_train_mode() {
            tracing::warn!("在评估模式下调用 backward，这通常是误用");
        }

        self.reset_intermediate_grad();
        self.get_node_mut(loss)?
            .set_grad(Some(&Tensor::ones(&[1, 1])))?;

        let topo_order = self.topological_sort_backward(loss)?;
        for node_id in topo_order {
            self.propagate_grad_to_parents(node_id)?;
        }

        if !retain_graph {
            self.release_intermediate_results();
        }

        Ok(loss_scalar)
    }

    /// 将梯度从当前节点传播到其父节点（输入节点不接收梯度）
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        if parent_ids.is_empty() {
            return Ok(());
        }

        let parent_grads: Vec<(NodeId, Tensor)> = {
            let node = self.get_node(node_id)?;
            let Some(upstream_grad) = node.grad() else {
                return Ok(());
            };

            let mut grads = Vec::with_capacity(parent_ids.len());
            for parent_id in &parent_ids {
                let parent = self.get_node(*parent_id)?;
                if let NodeType::Input(_) = parent.node_type() {
                    continue;
                }

                let assistant = parent_ids
                    .iter()
                    .find(|&&id| id != *parent_id)
                    .map(|&id| self.get_node(id))
                    .transpose()?;

                let parent_grad = node.calc_grad_to_parent(parent, upstream_grad, assistant)?;
                grads.push((*parent_id, parent_grad));
            }
            grads
        };

        for (parent_id, parent_grad) in parent_grads {
            let parent_node = self.get_node_mut(parent_id)?;
            let new_grad = match parent_node.grad() {
                Some(existing_grad) => existing_grad + &parent_grad,
                None => parent_grad,
            };
            parent_node.set_grad(Some(&new_grad))?;
        }

        Ok(())
    }

    /// 反向拓扑排序：保证每个节点在其所有子节点之后被处理
    fn topological_sort_backward(&self, loss_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        fn dfs(
            graph: &GraphInner,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
            post_order: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                dfs(graph, parent_id, visited, post_order)?;
            }
            post_order.push(node_id);
            Ok(())
        }

        let mut visited = HashSet::new();
        let mut post_order = Vec::new();
        dfs(self, loss_id, &mut visited, &mut post_order)?;
        post_order.reverse();
        Ok(post_order)
    }

    /// 清除所有节点的梯度
    pub fn clear_grad(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_grad();
        }
    }

    /// 清除单个节点的梯度
    pub fn clear_node_grad(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(node_id)?.clear_grad();
        Ok(())
    }
}
