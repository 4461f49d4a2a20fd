/*
 * @Description  : GraphInner 参数序列化（save_params/load_params）
 *
 * 以 bincode 编码保存所有参数节点（按名称对应），加载时要求两边的参数集合与形状完全一致
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeType;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// 参数文件魔数
const PARAMS_MAGIC: [u8; 4] = *b"GOPR";
/// 参数文件版本
const PARAMS_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ParamRecord {
    name: String,
    shape: Vec<usize>,
    data: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct ParamsFile {
    magic: [u8; 4],
    version: u32,
    params: Vec<ParamRecord>,
}

impl GraphInner {
    /// 保存所有参数节点到二进制文件
    pub fn save_params<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphError> {
        let mut params = Vec::new();
        for id in self.get_trainable_nodes() {
            let node = self.get_node(id)?;
            let value = node.value().ok_or_else(|| {
                GraphError::ComputationError(format!("参数{node}没有值"))
            })?;
            params.push(ParamRecord {
                name: node.name().to_string(),
                shape: value.shape().to_vec(),
                data: value.to_vec(),
            });
        }
        let file_content = ParamsFile {
            magic: PARAMS_MAGIC,
            version: PARAMS_VERSION,
            params,
        };

        let file = File::create(path.as_ref())
            .map_err(|e| GraphError::ComputationError(format!("无法创建参数文件: {e}")))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &file_content)
            .map_err(|e| GraphError::ComputationError(format!("写入参数文件失败: {e}")))?;
        writer
            .flush()
            .map_err(|e| GraphError::ComputationError(format!("刷新缓冲区失败: {e}")))
    }

    /// 从二进制文件加载参数。文件中的参数与图中的参数节点必须按名称一一对应且形状一致
    pub fn load_params<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GraphError> {
        let file = File::open(path.as_ref())
            .map_err(|e| GraphError::ComputationError(format!("无法打开参数文件: {e}")))?;
        let file_content: ParamsFile = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| GraphError::ComputationError(format!("参数文件解析失败: {e}")))?;

        if file_content.magic != PARAMS_MAGIC {
            return Err(GraphError::ComputationError(
                "无效的参数文件：请确保使用 save_params() 保存的文件".to_string(),
            ));
        }
        if file_content.version != PARAMS_VERSION {
            return Err(GraphError::ComputationError(format!(
                "不支持的参数文件版本: {}",
                file_content.version
            )));
        }

        let name_to_id: HashMap<String, NodeId> = self
            .nodes
            .iter()
            .filter_map(|(&id, node)| match node.node_type() {
                NodeType::Parameter(_) => Some((node.name().to_string(), id)),
                _ => None,
            })
            .collect();

        // 先全部校验再写入，出错时图中参数保持不变
        let mut loaded: HashMap<NodeId, Tensor> = HashMap::new();
        for record in file_content.params {
            let node_id = name_to_id.get(&record.name).copied().ok_or_else(|| {
                GraphError::InvalidOperation(format!("图中没有名为{}的参数", record.name))
            })?;
            let tensor = Tensor::try_new(&record.data, &record.shape).map_err(|e| {
                GraphError::ComputationError(format!("参数{}的数据损坏: {e}", record.name))
            })?;
            let expected = self.get_node_value_expected_shape(node_id)?;
            if tensor.shape() != expected {
                return Err(GraphError::ShapeMismatch {
                    expected: expected.to_vec(),
                    got: tensor.shape().to_vec(),
                    message: format!("参数{}的形状与文件中不一致", record.name),
                });
            }
            loaded.insert(node_id, tensor);
        }

        let mut missing: Vec<&str> = name_to_id
            .iter()
            .filter(|(_, id)| !loaded.contains_key(id))
            .map(|(name, _)| name.as_str())
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(GraphError::InvalidOperation(format!(
                "参数文件中缺少以下参数: {}",
                missing.join(", ")
            )));
        }

        for (node_id, tensor) in loaded {
            self.set_node_value(node_id, Some(&tensor))?;
        }

        Ok(())
    }
}
