// src/services/definitions.rs
//
// A tabela de definições é a espinha dorsal declarativa da automação de
// onboarding. Dois mapeamentos exaustivos sobre TaskType:
//
//   - card():       ficha de criação (título, descrição, prazo, marco)
//                   para TODO tipo de tarefa;
//   - definition(): regra de avanço, presente SÓ para tarefas que movem
//                   o cliente. `None` é o sinal de tarefa auxiliar: ela
//                   precisa ser concluída, mas não move o cliente.
//
// Os dois matches são exaustivos de propósito: adicionar um tipo novo sem
// decidir a transição dele vira erro de compilação, não no-op silencioso.

use crate::models::onboarding::{OnboardingStep, TaskType};

// Ficha de criação de uma tarefa. O título/descrição usam "{cliente}"
// como placeholder do nome do cliente.
#[derive(Debug, Clone, Copy)]
pub struct TaskCard {
    pub title: &'static str,
    pub description: &'static str,
    pub due_offset_days: i64,
    pub milestone: i32,
}

// Regra de avanço de uma tarefa avançadora.
#[derive(Debug, Clone, Copy)]
pub struct AdvanceDefinition {
    pub next_step: OnboardingStep,
    pub next_milestone: i32,
    // Sucessora única...
    pub next_task: Option<TaskType>,
    // ...ou lote de tarefas a criar em conjunto (auxiliares + sucessora).
    pub follow_up_tasks: &'static [TaskType],
    pub completes_onboarding: bool,
}

impl TaskCard {
    pub fn render_description(&self, client_name: &str) -> String {
        self.description.replace("{cliente}", client_name)
    }

    pub fn render_title(&self, client_name: &str) -> String {
        self.title.replace("{cliente}", client_name)
    }
}

impl TaskType {
    pub fn card(self) -> &'static TaskCard {
        match self {
            TaskType::MarcarCall1 => &TaskCard {
                title: "Marcar call 1 - {cliente}",
                description: "Agendar a primeira call de alinhamento com {cliente}.",
                due_offset_days: 1,
                milestone: 1,
            },
            TaskType::RealizarCall1 => &TaskCard {
                title: "Realizar call 1 - {cliente}",
                description: "Realizar a primeira call de alinhamento com {cliente}.",
                due_offset_days: 2,
                milestone: 1,
            },
            TaskType::EnviarFormulario => &TaskCard {
                title: "Enviar formulário - {cliente}",
                description: "Enviar o formulário de briefing para {cliente}.",
                due_offset_days: 1,
                milestone: 2,
            },
            TaskType::CobrarFormulario => &TaskCard {
                title: "Cobrar formulário - {cliente}",
                description: "Cobrar o retorno do formulário de briefing de {cliente}.",
                due_offset_days: 3,
                milestone: 2,
            },
            TaskType::MarcarCall2 => &TaskCard {
                title: "Marcar call 2 - {cliente}",
                description: "Agendar a call de estratégia com {cliente}.",
                due_offset_days: 1,
                milestone: 3,
            },
            TaskType::RealizarCall2 => &TaskCard {
                title: "Realizar call 2 - {cliente}",
                description: "Realizar a call de estratégia com {cliente}.",
                due_offset_days: 2,
                milestone: 3,
            },
            TaskType::BrifarCriativos => &TaskCard {
                title: "Brifar criativos - {cliente}",
                description: "Brifar o time de design com o material de {cliente}.",
                due_offset_days: 1,
                milestone: 3,
            },
            TaskType::AnexarLinkConsultoria => &TaskCard {
                title: "Anexar link da consultoria - {cliente}",
                description: "Anexar a gravação da consultoria no cadastro de {cliente}.",
                due_offset_days: 1,
                milestone: 4,
            },
            TaskType::CertificarConsultoria => &TaskCard {
                title: "Certificar consultoria - {cliente}",
                description: "Conferir se a consultoria de {cliente} cobriu o roteiro.",
                due_offset_days: 2,
                milestone: 4,
            },
            TaskType::EnviarLinkDrive => &TaskCard {
                title: "Enviar link do drive - {cliente}",
                description: "Enviar a pasta de materiais para {cliente}.",
                due_offset_days: 1,
                milestone: 4,
            },
            TaskType::AprovarCriativos => &TaskCard {
                title: "Aprovar criativos - {cliente}",
                description: "Coletar a aprovação dos criativos com {cliente}.",
                due_offset_days: 5,
                milestone: 4,
            },
            TaskType::ConfigurarCampanha => &TaskCard {
                title: "Configurar campanha - {cliente}",
                description: "Configurar a campanha de {cliente} no gerenciador.",
                due_offset_days: 2,
                milestone: 5,
            },
            TaskType::PublicarCampanha => &TaskCard {
                title: "Publicar campanha - {cliente}",
                description: "Publicar a campanha de {cliente} e conferir a veiculação.",
                due_offset_days: 2,
                milestone: 5,
            },
        }
    }

    // Regra de avanço. Tipos auxiliares retornam None e NÃO movem o cliente.
    pub fn definition(self) -> Option<&'static AdvanceDefinition> {
        match self {
            TaskType::MarcarCall1 => Some(&AdvanceDefinition {
                next_step: OnboardingStep::Call1Marcada,
                next_milestone: 1,
                next_task: Some(TaskType::RealizarCall1),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            TaskType::RealizarCall1 => Some(&AdvanceDefinition {
                next_step: OnboardingStep::Call1Realizada,
                next_milestone: 2,
                next_task: Some(TaskType::EnviarFormulario),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            TaskType::EnviarFormulario => Some(&AdvanceDefinition {
                next_step: OnboardingStep::FormularioEnviado,
                next_milestone: 2,
                next_task: Some(TaskType::CobrarFormulario),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            TaskType::CobrarFormulario => Some(&AdvanceDefinition {
                next_step: OnboardingStep::FormularioRecebido,
                next_milestone: 3,
                next_task: Some(TaskType::MarcarCall2),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            TaskType::MarcarCall2 => Some(&AdvanceDefinition {
                next_step: OnboardingStep::Call2Marcada,
                next_milestone: 3,
                next_task: Some(TaskType::RealizarCall2),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            TaskType::RealizarCall2 => Some(&AdvanceDefinition {
                next_step: OnboardingStep::Call2Realizada,
                next_milestone: 3,
                next_task: Some(TaskType::BrifarCriativos),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            // Único ponto do funil que dispara um lote: três auxiliares
            // mais a sucessora que de fato avança (aprovar_criativos).
            TaskType::BrifarCriativos => Some(&AdvanceDefinition {
                next_step: OnboardingStep::CriativosBrifados,
                next_milestone: 4,
                next_task: None,
                follow_up_tasks: &[
                    TaskType::AnexarLinkConsultoria,
                    TaskType::CertificarConsultoria,
                    TaskType::EnviarLinkDrive,
                    TaskType::AprovarCriativos,
                ],
                completes_onboarding: false,
            }),
            TaskType::AprovarCriativos => Some(&AdvanceDefinition {
                next_step: OnboardingStep::CriativosAprovados,
                next_milestone: 5,
                next_task: Some(TaskType::ConfigurarCampanha),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            TaskType::ConfigurarCampanha => Some(&AdvanceDefinition {
                next_step: OnboardingStep::CampanhaConfigurada,
                next_milestone: 5,
                next_task: Some(TaskType::PublicarCampanha),
                follow_up_tasks: &[],
                completes_onboarding: false,
            }),
            // Terminal: conclui o onboarding, não cria nada depois.
            TaskType::PublicarCampanha => Some(&AdvanceDefinition {
                next_step: OnboardingStep::CampanhaPublicada,
                next_milestone: 6,
                next_task: None,
                follow_up_tasks: &[],
                completes_onboarding: true,
            }),

            // Auxiliares: concluir não move o cliente.
            TaskType::AnexarLinkConsultoria
            | TaskType::CertificarConsultoria
            | TaskType::EnviarLinkDrive => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TASK_TYPES: [TaskType; 13] = [
        TaskType::MarcarCall1,
        TaskType::RealizarCall1,
        TaskType::EnviarFormulario,
        TaskType::CobrarFormulario,
        TaskType::MarcarCall2,
        TaskType::RealizarCall2,
        TaskType::BrifarCriativos,
        TaskType::AnexarLinkConsultoria,
        TaskType::CertificarConsultoria,
        TaskType::EnviarLinkDrive,
        TaskType::AprovarCriativos,
        TaskType::ConfigurarCampanha,
        TaskType::PublicarCampanha,
    ];

    #[test]
    fn advancing_tasks_never_decrease_milestone() {
        for tipo in ALL_TASK_TYPES {
            if let Some(def) = tipo.definition() {
                assert!(
                    def.next_milestone >= tipo.card().milestone,
                    "{tipo:?} voltaria do marco {} para {}",
                    tipo.card().milestone,
                    def.next_milestone
                );
            }
        }
    }

    #[test]
    fn terminal_task_creates_nothing_after_it() {
        let def = TaskType::PublicarCampanha.definition().unwrap();
        assert!(def.completes_onboarding);
        assert!(def.next_task.is_none());
        assert!(def.follow_up_tasks.is_empty());
    }

    #[test]
    fn only_terminal_completes_onboarding() {
        for tipo in ALL_TASK_TYPES {
            if let Some(def) = tipo.definition() {
                assert_eq!(
                    def.completes_onboarding,
                    tipo == TaskType::PublicarCampanha,
                    "{tipo:?}"
                );
            }
        }
    }

    #[test]
    fn auxiliary_tasks_have_no_advance_definition() {
        assert!(TaskType::AnexarLinkConsultoria.definition().is_none());
        assert!(TaskType::CertificarConsultoria.definition().is_none());
        assert!(TaskType::EnviarLinkDrive.definition().is_none());
    }

    #[test]
    fn brifar_criativos_batch_has_four_follow_ups() {
        let def = TaskType::BrifarCriativos.definition().unwrap();
        assert_eq!(def.follow_up_tasks.len(), 4);
        assert!(def.next_task.is_none());
        // Três auxiliares + uma sucessora avançadora.
        let advancing: Vec<_> = def
            .follow_up_tasks
            .iter()
            .filter(|t| t.definition().is_some())
            .collect();
        assert_eq!(advancing, vec![&TaskType::AprovarCriativos]);
        assert_eq!(def.next_milestone, 4);
        assert_eq!(TaskType::BrifarCriativos.card().milestone, 3);
    }

    #[test]
    fn realizar_call_1_is_due_two_days_after_creation() {
        assert_eq!(TaskType::RealizarCall1.card().due_offset_days, 2);
    }

    #[test]
    fn description_template_renders_client_name() {
        let card = TaskType::MarcarCall1.card();
        let text = card.render_description("Padaria Azul");
        assert!(text.contains("Padaria Azul"));
        assert!(!text.contains("{cliente}"));
    }

    #[test]
    fn chain_is_connected_up_to_terminal() {
        // Seguindo next_task a partir da primeira tarefa, o funil precisa
        // alcançar a terminal sem laços.
        let mut current = TaskType::MarcarCall1;
        let mut visited = vec![current];
        loop {
            let def = current.definition().expect("elo do funil sem definição");
            if def.completes_onboarding {
                break;
            }
            let next = def
                .next_task
                .or_else(|| {
                    def.follow_up_tasks
                        .iter()
                        .copied()
                        .find(|t| t.definition().is_some())
                })
                .expect("funil interrompido antes da terminal");
            assert!(!visited.contains(&next), "laço no funil em {next:?}");
            visited.push(next);
            current = next;
        }
        assert_eq!(*visited.last().unwrap(), TaskType::PublicarCampanha);
    }
}
