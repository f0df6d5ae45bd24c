use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  Browse,
  CancelBrowse,
  ConfirmSave,
  DeclineSave,
  HideHelp,
  None,
  Quit,
  Save,
  SelectDirectory(PathBuf),
  ShowHelp,
}
